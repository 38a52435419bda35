// Lignes factices pour les tests avec MockDatabase

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::models::{course_reviews, courses, enrollments, lessons, profiles, sections};

pub fn at(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap() + Duration::days(days)
}

pub fn user(user_id: Uuid) -> AuthUser {
    AuthUser {
        user_id,
        email: Some("student@example.com".to_string()),
        full_name: None,
    }
}

pub fn profile(full_name: &str) -> profiles::Model {
    profiles::Model {
        id: Uuid::new_v4(),
        username: None,
        full_name: Some(full_name.to_string()),
        avatar_url: Some(format!("https://cdn.example.com/{}.png", full_name.len())),
        tier: "Free".to_string(),
        created_at: Some(at(0)),
        updated_at: Some(at(0)),
    }
}

pub fn course(title: &str, instructor_id: Uuid) -> courses::Model {
    courses::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        subtitle: None,
        description: Some(format!("Learn {} from scratch", title)),
        instructor_id,
        category: "Programming".to_string(),
        level: "Beginner".to_string(),
        price: Decimal::new(4999, 2),
        original_price: None,
        image_url: None,
        duration: Some("10h".to_string()),
        language: "English".to_string(),
        is_published: true,
        is_bestseller: false,
        is_new: false,
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn review(course_id: Uuid, rating: i32) -> course_reviews::Model {
    course_reviews::Model {
        id: Uuid::new_v4(),
        course_id,
        user_id: Uuid::new_v4(),
        rating,
        comment: None,
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn enrollment(user_id: Uuid, course_id: Uuid, progress: i32) -> enrollments::Model {
    enrollments::Model {
        id: Uuid::new_v4(),
        user_id,
        course_id,
        enrolled_at: at(2),
        progress,
        completed_at: None,
        last_accessed: None,
    }
}

pub fn section(course_id: Uuid, title: &str, order_index: i32) -> sections::Model {
    sections::Model {
        id: Uuid::new_v4(),
        course_id,
        title: title.to_string(),
        description: None,
        order_index,
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn lesson(section: &sections::Model, title: &str, order_index: i32) -> lessons::Model {
    lessons::Model {
        id: Uuid::new_v4(),
        course_id: section.course_id,
        section_id: section.id,
        title: title.to_string(),
        description: None,
        video_url: None,
        duration: Some("5:00".to_string()),
        order_index,
        is_preview: order_index == 0,
        created_at: at(0),
        updated_at: at(0),
    }
}
