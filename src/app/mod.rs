pub mod catalog;
pub mod fragments;
