//! Status service - library summary

use std::sync::Arc;

use serde::Serialize;

use crate::domain::ReadingStatus;
use crate::ports::CatalogRepository;

pub struct StatusService {
    repository: Arc<dyn CatalogRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Summarize the active reader's library
    pub fn get_status(&self) -> LibrarySummary {
        let books = self.repository.user_books();
        let collections = self.repository.user_collections();

        let ratings: Vec<f32> = books.iter().filter_map(|b| b.rating).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f32>() / ratings.len() as f32)
        };

        let by_status = ReadingStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: books.iter().filter(|b| b.status == *status).count(),
            })
            .collect();

        let reading_goal = self.repository.current_user().map(|user| {
            let goal = user.reading_preferences.reading_goal;
            GoalProgress {
                target: goal.target_books_per_year,
                progress: goal.current_progress,
                period: goal.goal_type.to_string(),
                completion: goal.completion(),
            }
        });

        LibrarySummary {
            total_books: books.len(),
            total_collections: collections.len(),
            rated_books: ratings.len(),
            average_rating,
            by_status,
            reading_goal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LibrarySummary {
    pub total_books: usize,
    pub total_collections: usize,
    pub rated_books: usize,
    pub average_rating: Option<f32>,
    pub by_status: Vec<StatusCount>,
    pub reading_goal: Option<GoalProgress>,
}

#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: ReadingStatus,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct GoalProgress {
    pub target: u32,
    pub progress: u32,
    pub period: String,
    pub completion: f32,
}
