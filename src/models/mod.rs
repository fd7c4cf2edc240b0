pub mod course;
pub mod roadmap;

pub use course::{Course, Doc, Quiz, RoadmapDay, RoadmapSummary, StoredDay, StoredRoadmap, Video};
pub use roadmap::{
    CreateRoadmapResponse, GenerateRequest, GenerateResponse, QuizEntry, RoadmapDocument,
    RoadmapEntry, VideoEntry,
};
