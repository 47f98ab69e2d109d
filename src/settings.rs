// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for reading.

/// How many lists may be open at the same time. The limit with
/// default thread stack sizes on Linux is above 1000.
pub const DEFAULT_MAX_DEPTH: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub max_depth: u32,
}

pub const DEFAULT_SETTINGS: Settings = Settings {
    max_depth: DEFAULT_MAX_DEPTH,
};

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}
