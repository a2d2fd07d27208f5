pub mod pipeline;

pub use pipeline::{student_of, ClassroomSync};
