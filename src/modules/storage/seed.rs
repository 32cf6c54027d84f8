//! Default content written into an empty store.

use chrono::{NaiveDate, NaiveTime};

use crate::features::categories::models::NewCategory;
use crate::features::events::models::NewEvent;

/// The seven community areas, in seed order
pub fn default_categories() -> Vec<NewCategory> {
    [
        (
            "Sports & Recreation",
            "Local sports clubs, fitness classes, recreational activities, and community leagues",
            "/images/sports.jpg",
        ),
        (
            "Health & Wellness",
            "Healthcare services, wellness programmes, and health-focused community initiatives",
            "/images/health.jpg",
        ),
        (
            "Education & Learning",
            "Educational programmes, workshops, tutoring services, and lifelong learning opportunities",
            "/images/education.jpg",
        ),
        (
            "Arts & Culture",
            "Cultural events, art classes, music programmes, and creative community initiatives",
            "/images/arts.jpg",
        ),
        (
            "Environment & Sustainability",
            "Environmental initiatives, community gardens, and sustainability programmes",
            "/images/environment.jpg",
        ),
        (
            "Social Services",
            "Community support services, volunteer opportunities, and social assistance programmes",
            "/images/social.jpg",
        ),
        (
            "Shop Safe, Shop Local",
            "Support local businesses, shop safely, and connect with neighbourhood sellers and services",
            "/images/local-business.jpg",
        ),
    ]
    .into_iter()
    .map(|(name, description, image_url)| NewCategory {
        name: name.to_string(),
        description: Some(description.to_string()),
        image_url: Some(image_url.to_string()),
    })
    .collect()
}

/// Sample events. `category_of` resolves a seeded category name to its id.
pub fn sample_events(category_of: impl Fn(&str) -> Option<i64>) -> Vec<NewEvent> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    let time = |h, m| NaiveTime::from_hms_opt(h, m, 0);

    vec![
        NewEvent {
            title: "Annual Local Community Fair".to_string(),
            description: Some(
                "Join us for our biggest community celebration of the year! Features local vendors, \
                 live music, food trucks, kids' activities, and much more. Free admission for all residents."
                    .to_string(),
            ),
            content: None,
            image_url: None,
            location: Some("Excel Centre".to_string()),
            date: date(2025, 8, 15),
            start_time: time(10, 0),
            end_time: time(20, 0),
            address: None,
            category_id: category_of("Social Services"),
            featured: true,
        },
        NewEvent {
            title: "Community Movie Night".to_string(),
            description: Some("Indoor screening of family-friendly movies".to_string()),
            content: None,
            image_url: None,
            location: Some("Community Center".to_string()),
            date: date(2025, 8, 18),
            start_time: time(18, 0),
            end_time: time(20, 0),
            address: None,
            category_id: category_of("Arts & Culture"),
            featured: false,
        },
        NewEvent {
            title: "Farmers Market".to_string(),
            description: Some("Fresh local produce and handmade goods".to_string()),
            content: None,
            image_url: None,
            location: Some("Stratford Shopping Centre".to_string()),
            date: date(2025, 8, 20),
            start_time: time(8, 0),
            end_time: time(14, 0),
            address: None,
            category_id: category_of("Shop Safe, Shop Local"),
            featured: false,
        },
        NewEvent {
            title: "Art Workshop".to_string(),
            description: Some("Learn watercolor painting techniques".to_string()),
            content: None,
            image_url: None,
            location: Some("Arts Center".to_string()),
            date: date(2025, 8, 25),
            start_time: time(14, 0),
            end_time: time(17, 0),
            address: None,
            category_id: category_of("Education & Learning"),
            featured: false,
        },
    ]
}
