// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Feature-line nature flags

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Kind of feature line a face layer carries.
    ///
    /// The empty set means "no feature".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Nature: u16 {
        const SILHOUETTE = 1 << 0;
        const BORDER = 1 << 1;
        const CREASE = 1 << 2;
        const RIDGE = 1 << 3;
        const VALLEY = 1 << 4;
        const SUGGESTIVE_CONTOUR = 1 << 5;
        const MATERIAL_BOUNDARY = 1 << 6;
        const EDGE_MARK = 1 << 7;
    }
}

impl Nature {
    /// True when the set describes no feature at all.
    pub fn is_no_feature(self) -> bool {
        self.is_empty()
    }
}
