use sea_orm::*;
use sea_orm::sea_query::{Condition, Expr, Func, LikeExpr, SimpleExpr};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CourseDetail, CourseSummary, ReviewView, SearchFilters, SectionView};
use crate::models::{course_reviews, courses, enrollments, lessons, profiles, sections};
use crate::services::aggregation::{self, ratings_by_course, students_by_course};

pub struct CourseService;

impl CourseService {
    /// Cours publiés, du plus récent au plus ancien, avec note et nb d'étudiants
    pub async fn list_published(db: &DatabaseConnection) -> Result<Vec<CourseSummary>, AppError> {
        let courses = courses::Entity::find()
            .filter(courses::Column::IsPublished.eq(true))
            .order_by_desc(courses::Column::CreatedAt)
            .all(db)
            .await?;

        Self::summarize_all(db, courses).await
    }

    /// Recherche texte (titre OU description, insensible à la casse) + filtres.
    /// La note minimale est appliquée après agrégation: c'est un champ calculé.
    pub async fn search(
        db: &DatabaseConnection,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<CourseSummary>, AppError> {
        let mut select = courses::Entity::find().filter(courses::Column::IsPublished.eq(true));

        let query = query.trim();
        if !query.is_empty() {
            let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
            select = select.filter(
                Condition::any()
                    .add(lower_like(courses::Column::Title, &pattern))
                    .add(lower_like(courses::Column::Description, &pattern)),
            );
        }

        if let Some(category) = &filters.category {
            select = select.filter(courses::Column::Category.eq(category.as_str()));
        }

        if let Some(level) = &filters.level {
            select = select.filter(courses::Column::Level.eq(level.as_str()));
        }

        if let Some((min, max)) = filters.price_range {
            select = select
                .filter(courses::Column::Price.gte(min))
                .filter(courses::Column::Price.lte(max));
        }

        let courses = select
            .order_by_desc(courses::Column::CreatedAt)
            .all(db)
            .await?;

        let summaries = Self::summarize_all(db, courses).await?;

        match filters.min_rating {
            Some(min_rating) => Ok(summaries
                .into_iter()
                .filter(|course| course.rating >= min_rating)
                .collect()),
            None => Ok(summaries),
        }
    }

    /// Détail d'un cours: sections + leçons, avis + auteurs, stats.
    /// Un cours non publié n'est visible que par son instructeur.
    pub async fn get_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        viewer: Option<&AuthUser>,
    ) -> Result<CourseDetail, AppError> {
        // 1. Le cours lui-même
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Course"))?;

        let is_owner = viewer.is_some_and(|user| user.user_id == course.instructor_id);
        if !course.is_published && !is_owner {
            return Err(AppError::not_found("Course"));
        }

        // 2. L'instructeur
        let instructor = profiles::Entity::find_by_id(course.instructor_id)
            .one(db)
            .await?;

        // 3. Le programme, dans l'ordre d'affichage
        let course_sections = sections::Entity::find()
            .filter(sections::Column::CourseId.eq(course_id))
            .order_by_asc(sections::Column::OrderIndex)
            .all(db)
            .await?;

        let course_lessons = lessons::Entity::find()
            .filter(lessons::Column::CourseId.eq(course_id))
            .order_by_asc(lessons::Column::OrderIndex)
            .all(db)
            .await?;

        // 4. Les avis et leurs auteurs (une seule requête pour tous les profils)
        let reviews = course_reviews::Entity::find()
            .filter(course_reviews::Column::CourseId.eq(course_id))
            .order_by_desc(course_reviews::Column::CreatedAt)
            .all(db)
            .await?;

        let reviewers = if reviews.is_empty() {
            HashMap::new()
        } else {
            let reviewer_ids: Vec<Uuid> = reviews
                .iter()
                .map(|r| r.user_id)
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();
            Self::profiles_by_id(db, reviewer_ids).await?
        };

        // 5. Les inscriptions
        let student_count = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .all(db)
            .await?
            .len();

        let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
        let instructor_avatar = instructor.as_ref().and_then(|p| p.avatar_url.clone());
        let summary = aggregation::summarize(course, instructor.as_ref(), &ratings, student_count);

        Ok(CourseDetail {
            course: summary,
            instructor_avatar,
            sections: group_lessons(course_sections, course_lessons),
            reviews: reviews
                .into_iter()
                .map(|review| {
                    let reviewer = reviewers.get(&review.user_id);
                    let name = aggregation::instructor_name(reviewer);
                    let avatar = reviewer.and_then(|p| p.avatar_url.clone());
                    ReviewView::new(review, name, avatar)
                })
                .collect(),
        })
    }

    /// Catégories distinctes, dans l'ordre de première apparition
    pub fn categories(courses: &[CourseSummary]) -> Vec<String> {
        let mut seen = HashSet::new();
        courses
            .iter()
            .filter(|c| seen.insert(c.category.as_str()))
            .map(|c| c.category.clone())
            .collect()
    }

    /// Cours "tendance": nouveaux ou bestsellers
    pub fn trending(courses: &[CourseSummary], limit: usize) -> Vec<CourseSummary> {
        courses
            .iter()
            .filter(|c| c.is_new || c.is_bestseller)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Charge instructeurs, notes et inscriptions de tous les cours en 3 requêtes
    /// (lookup HashMap au lieu de N requêtes), puis calcule les champs dérivés.
    /// L'ordre des cours en entrée est conservé.
    pub async fn summarize_all(
        db: &DatabaseConnection,
        courses: Vec<courses::Model>,
    ) -> Result<Vec<CourseSummary>, AppError> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<Uuid> = courses.iter().map(|c| c.id).collect();
        let instructor_ids: Vec<Uuid> = courses
            .iter()
            .map(|c| c.instructor_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let instructors = Self::profiles_by_id(db, instructor_ids).await?;

        let reviews = course_reviews::Entity::find()
            .filter(course_reviews::Column::CourseId.is_in(course_ids.clone()))
            .all(db)
            .await?;

        let course_enrollments = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.is_in(course_ids))
            .all(db)
            .await?;

        let ratings = ratings_by_course(&reviews);
        let students = students_by_course(&course_enrollments);

        Ok(courses
            .into_iter()
            .map(|course| {
                let instructor = instructors.get(&course.instructor_id);
                let course_ratings = ratings.get(&course.id).map(Vec::as_slice).unwrap_or(&[]);
                let student_count = students.get(&course.id).copied().unwrap_or(0);
                aggregation::summarize(course, instructor, course_ratings, student_count)
            })
            .collect())
    }

    pub async fn profiles_by_id(
        db: &DatabaseConnection,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, profiles::Model>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = profiles::Entity::find()
            .filter(profiles::Column::Id.is_in(ids))
            .all(db)
            .await?;

        Ok(found.into_iter().map(|p| (p.id, p)).collect())
    }
}

/// LOWER(col) LIKE pattern, le pattern étant déjà en minuscules
fn lower_like(column: courses::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Échappe les jokers LIKE saisis par l'utilisateur
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Range les leçons sous leur section (les deux listes sont déjà triées)
fn group_lessons(sections: Vec<sections::Model>, lessons: Vec<lessons::Model>) -> Vec<SectionView> {
    let mut by_section: HashMap<Uuid, Vec<lessons::Model>> = HashMap::new();
    for lesson in lessons {
        by_section.entry(lesson.section_id).or_default().push(lesson);
    }

    sections
        .into_iter()
        .map(|section| SectionView {
            lessons: by_section.remove(&section.id).unwrap_or_default(),
            id: section.id,
            title: section.title,
            description: section.description,
            order_index: section.order_index,
        })
        .collect()
}
