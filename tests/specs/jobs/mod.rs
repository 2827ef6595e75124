// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod batch;
mod errors;
mod filelists;
mod platforms;
mod standard;
