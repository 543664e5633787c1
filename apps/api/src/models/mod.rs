pub mod resume;
pub mod saved;

pub use resume::{
    Certification, Education, Experience, Language, PersonalInfo, Proficiency, ResumeData,
    Skill, SkillLevel, TemplateKind,
};
pub use saved::{ResumePatch, SavedResume};
