//! Concurrent access tests for the in-memory catalog
//!
//! The store is shared between services through `Arc`. These tests hammer one
//! catalog from several threads and check that no update is lost.
//!
//! Run with: cargo test --test concurrent_access_test -- --nocapture

use std::sync::{Arc, Barrier};
use std::thread;

use bookbuddy_core::adapters::memory::InMemoryCatalog;
use bookbuddy_core::ports::CatalogRepository;
use bookbuddy_core::{Book, UserProfile};

const THREAD_COUNT: usize = 6;

const BOOKS_PER_THREAD: usize = 50;

fn logged_in_catalog() -> Arc<InMemoryCatalog> {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.register_user(UserProfile::new("reader", "reader@example.com"), "hash".into());
    catalog
}

#[test]
fn test_concurrent_book_inserts() {
    let catalog = logged_in_catalog();
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|thread_id| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..BOOKS_PER_THREAD {
                    let id = format!("t{}-b{}", thread_id, i);
                    assert!(catalog.add_book(Book::with_id(id, "Title", "Author")));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(catalog.user_books().len(), THREAD_COUNT * BOOKS_PER_THREAD);
}

#[test]
fn test_concurrent_collection_adds_never_duplicate() {
    let catalog = logged_in_catalog();
    catalog.add_book(Book::with_id("b1", "Dune", "Frank Herbert"));
    catalog.create_collection("Favorites");

    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                catalog.add_book_to_collection("Favorites", "b1")
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|added| *added)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(catalog.get_collection("Favorites").unwrap().len(), 1);
}

#[test]
fn test_concurrent_registration_same_email() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                catalog.register_user(
                    UserProfile::new(format!("reader{}", i), "race@example.com"),
                    format!("hash{}", i),
                )
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|registered| *registered)
        .count();
    assert_eq!(winners, 1);
}
