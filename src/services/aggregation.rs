// Champs dérivés communs aux vues cours: note moyenne, nombre d'étudiants,
// nom de l'instructeur, badge de réduction.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::dto::CourseSummary;
use crate::models::{course_reviews, courses, enrollments, profiles};

pub const UNKNOWN_INSTRUCTOR: &str = "Unknown Instructor";
pub const NEW_COURSE_LABEL: &str = "New";

/// Moyenne arithmétique des notes, 0 si aucun avis
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
    sum as f64 / ratings.len() as f64
}

/// "New" tant que le cours n'a aucun avis, sinon la note avec une décimale
pub fn rating_label(rating: f64, review_count: usize) -> String {
    if review_count == 0 {
        NEW_COURSE_LABEL.to_string()
    } else {
        format!("{:.1}", rating)
    }
}

/// Pourcentage de réduction arrondi, None quand il n'y a rien à afficher
/// (pas de prix barré, prix barré <= prix, ou réduction arrondie à 0%)
pub fn discount_percent(price: Decimal, original_price: Option<Decimal>) -> Option<u32> {
    let original = original_price?;
    if original <= Decimal::ZERO || original <= price {
        return None;
    }

    let percent = ((original - price) / original * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    percent.to_u32().filter(|p| *p > 0)
}

pub fn instructor_name(profile: Option<&profiles::Model>) -> String {
    profile
        .and_then(|p| p.full_name.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_INSTRUCTOR.to_string())
}

/// Regroupe les notes par cours
pub fn ratings_by_course(reviews: &[course_reviews::Model]) -> HashMap<Uuid, Vec<i32>> {
    let mut ratings: HashMap<Uuid, Vec<i32>> = HashMap::new();
    for review in reviews {
        ratings.entry(review.course_id).or_default().push(review.rating);
    }
    ratings
}

/// Compte les inscriptions par cours
pub fn students_by_course(enrollments: &[enrollments::Model]) -> HashMap<Uuid, usize> {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for enrollment in enrollments {
        *counts.entry(enrollment.course_id).or_insert(0) += 1;
    }
    counts
}

/// Construit la vue "carte" d'un cours à partir des relations déjà chargées
pub fn summarize(
    course: courses::Model,
    instructor: Option<&profiles::Model>,
    ratings: &[i32],
    student_count: usize,
) -> CourseSummary {
    let rating = average_rating(ratings);
    let review_count = ratings.len();

    CourseSummary {
        id: course.id,
        title: course.title,
        subtitle: course.subtitle,
        description: course.description,
        instructor_id: course.instructor_id,
        instructor_name: instructor_name(instructor),
        category: course.category,
        level: course.level,
        discount_percent: discount_percent(course.price, course.original_price),
        price: course.price,
        original_price: course.original_price,
        image_url: course.image_url,
        duration: course.duration,
        language: course.language,
        is_published: course.is_published,
        is_bestseller: course.is_bestseller,
        is_new: course.is_new,
        rating,
        rating_label: rating_label(rating, review_count),
        student_count,
        review_count,
        created_at: course.created_at,
        updated_at: course.updated_at,
    }
}
