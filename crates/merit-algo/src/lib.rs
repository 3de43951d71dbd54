//! # merit-algo: Merit-Order Production Planning
//!
//! Dispatch algorithms that turn a priced [`Fleet`](merit_core::Fleet) and a
//! requested load into a per-plant production plan.
//!
//! ## Pipeline
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Merit order | [`merit_order`] | plants sorted by cost per MWh |
//! | Dispatch | [`DispatchEngine::solve`] | [`DispatchSolution`] |
//! | Formatting | [`format_production_plan`] | [`PlantOutput`] records |
//! | Whole request | [`plan_production`] | [`ProductionPlan`] |
//!
//! The engine fills plants greedily in merit order and falls back to a
//! recursive transition search when the remaining load is below the next
//! plant's minimum output. Search depth and wall-clock time are bounded by
//! [`DispatchConfig`]; exceeding either yields
//! [`MeritError::Timeout`](merit_core::MeritError::Timeout).
//!
//! ## Example
//!
//! ```ignore
//! use merit_algo::{plan_production, DispatchConfig};
//! use merit_core::LoadRequest;
//!
//! let request = LoadRequest::from_path("payload.json")?;
//! let plan = plan_production(&request, &DispatchConfig::default())?;
//! println!("{}", plan.to_json()?);
//! ```

pub mod dispatch;
pub mod merit_order;
pub mod plan;

pub use dispatch::{DispatchConfig, DispatchEngine, DispatchSolution, SearchStats};
pub use merit_order::{fleet_merit_order, merit_order};
pub use plan::{format_production_plan, plan_production, PlantOutput, ProductionPlan};
