//! Transit Planner Library
//!
//! Route, network-design and resource-allocation queries over a city
//! transport network.

pub mod planner;
