pub mod domain;
pub mod extract;
pub mod ports;

pub use domain::{
    CourseResult, Quiz, QuizQuestion, RenderedDocument, StudyGuide, StudyGuidePdf, Topic,
    TopicError, Video,
};
pub use extract::{extract_json_object, ExtractError};
pub use ports::{
    GenerationRequest, PortError, PortResult, ResponseFormat, TextGenerationService,
    VideoSearchService,
};
