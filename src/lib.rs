/*!
 * # xcstrings-tools - maintenance utilities for Xcode string catalogs
 *
 * A Rust library and CLI for keeping `.xcstrings` localization catalogs tidy.
 *
 * ## Features
 *
 * - Merge known translations into a catalog without overwriting finished ones
 * - Report stale strings, unreviewed (`new`) translations and languages
 *   missing from each entry
 * - Remove stale strings
 * - Preserve every field the tools do not understand, in its original order
 * - Atomic saves: a failed run never leaves a half-written catalog
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `catalog`: Document model and normalized states
 * - `operations`: The catalog transforms:
 *   - `operations::merge`: Translation merging
 *   - `operations::status`: Status analysis and report rendering
 *   - `operations::prune`: Stale entry removal
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod operations;

// Re-export main types for easier usage
pub use app_config::Config;
pub use catalog::{Catalog, State};
pub use errors::{AppError, CatalogError};
pub use operations::{StatusReport, merge_translations, prune_stale};
