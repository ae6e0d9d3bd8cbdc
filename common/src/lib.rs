// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Common Modul for the geo shell
//!
//! Provides the position data types that are shared between the geolocation
//! adapter and the shell.

pub mod position;
