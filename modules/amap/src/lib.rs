// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! AMap SDK loading and geolocation.
//!
//! The mapping SDK is consumed through the traits in [`sdk`]. [`loader::SdkLoader`]
//! makes sure the SDK is loaded at most once, [`geolocation::GeolocationAdapter`]
//! turns the callback based position query into a [`PositionResult`].

pub use common::position::{Coordinates, Position, PositionResult};

pub mod config;
pub mod constant_sdk;
pub mod error;
pub mod geolocation;
pub mod loader;
pub mod sdk;
pub mod test_helper;
