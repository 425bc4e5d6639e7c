pub mod config;
pub mod error;
pub mod domain {
    pub mod features;
    pub mod prediction;
}
pub mod schema {
    pub mod canonical;
}
pub mod model {
    pub mod artifact;
}
pub mod scoring {
    pub mod engine;
}
pub mod attribution {
    pub mod engine;
}
pub mod http {
    pub mod handlers {
        pub mod predictions;
    }
}
pub mod service {
    pub mod prediction_service;
}

#[derive(Clone)]
pub struct AppState {
    pub prediction_service: service::prediction_service::PredictionService,
}
