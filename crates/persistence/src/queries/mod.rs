// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query operations for the persistence layer.

pub mod comment;
pub mod incident;
pub mod notification;
pub mod status_log;
