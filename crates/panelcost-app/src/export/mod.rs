//! Estimate export

mod excel;

pub use excel::export_estimate_to_excel;
