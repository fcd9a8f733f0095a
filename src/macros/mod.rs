//! Helper macros for declaring records

mod attributes;
