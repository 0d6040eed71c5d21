// Data models for the scheduling grid

pub mod event;
