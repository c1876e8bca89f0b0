//! Core library for the aion-tools command line application.
//!
//! The library powers two maintenance utilities for the Project Aion
//! workspace as well as the integration tests. The modules are structured to
//! keep responsibilities narrow and composable: the in-memory workbook
//! representation lives in [`aion::tools::model`], IO adapters under
//! [`aion::tools::io`], header inference in [`aion::tools::header`], the
//! ticket autofill orchestration in [`aion::tools::autofill`], and the
//! specification-tree synchronizer in [`aion::tools::trees`].

pub mod aion;

pub use aion::tools::{
    Result, ToolError, autofill, error, header, io, listing, model, project, region, trees,
    validation,
};
