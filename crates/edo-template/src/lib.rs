mod archive;
mod boilerplate;
mod error;
mod files;
mod names;
mod questions;
mod substitute;

pub use archive::extract_tgz;
pub use boilerplate::{
    Boilerplate, BoilerplateMapping, group_by_category, parse_boilerplate_mapping,
};
pub use error::TemplateError;
pub use files::{BOILERPLATE_DIR, render_boilerplate};
pub use names::map_file_name;
pub use questions::{QUESTIONS_FILE, Question, QuestionKind, Questions, load_questions};
pub use substitute::{Variables, substitute};

pub type Result<T> = std::result::Result<T, TemplateError>;
