//! API models for request and response payloads
//!
//! Each entity module holds the stored record (also the response shape),
//! the create payload with its defaults and required-field check, the
//! partial update payload and the list filter.

pub mod coordinator;
pub mod department;
pub mod homepage_image;
pub mod officer;
pub mod program;
pub mod student;
pub mod student_report;

pub use coordinator::{Coordinator, CoordinatorChanges, CoordinatorFilter, NewCoordinator};
pub use department::{Department, DepartmentChanges, NewDepartment};
pub use homepage_image::{
    HomepageImage, HomepageImageChanges, HomepageImageFilter, ImageSide, InvalidImageSide,
    NewHomepageImage,
};
pub use officer::{NewOfficer, OfficerChanges, OfficerCredential, OfficerFilter};
pub use program::{NewProgram, Program, ProgramChanges};
pub use student::{NewStudent, RegisteredStudent, StudentChanges, StudentFilter};
pub use student_report::{NewStudentReport, StudentReport, StudentReportChanges};

/// Overwrite `target` when an update supplies a value
pub(crate) fn assign<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
