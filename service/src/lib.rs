pub mod catalog_view_model;
pub mod error;
pub mod favorites_service;
pub mod filter;
pub mod item_presenter;
pub mod navigation;
pub mod view_models;
