pub mod roadmap_service;

pub use roadmap_service::RoadmapService;
