//! CORDON algorithm layer
//! Flow networks, closure reduction, and size-bounded selection
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod closure;
pub mod max_flow;
pub mod size_limit;
pub mod size_search;

pub use self::closure::*;
pub use self::max_flow::*;
pub use self::size_limit::*;
pub use self::size_search::*;
