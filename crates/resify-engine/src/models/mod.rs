pub mod resume;

pub use resume::{Education, Employment, Me, Meta, Place, Profile, Profiles, Resume};
