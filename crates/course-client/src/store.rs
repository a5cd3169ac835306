//! # Course Store
//!
//! The typed, read-only view of every slice. Views clone it freely; writes
//! only ever come from each slice's own hook.

use crate::slices::{AllReviews, CreatorCourses, CurrentUser, PublishedCourses};
use store_sync::SliceReader;

#[derive(Clone)]
pub struct CourseStore {
    pub courses: SliceReader<PublishedCourses>,
    pub reviews: SliceReader<AllReviews>,
    pub current_user: SliceReader<CurrentUser>,
    pub creator_courses: SliceReader<CreatorCourses>,
}
