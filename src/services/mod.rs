pub mod aggregation;
pub mod authoring_service;
pub mod course_service;
pub mod enrollment_service;

#[cfg(test)]
pub mod test_fixtures;
