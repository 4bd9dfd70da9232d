// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod alerts;
pub mod customers;
pub mod doctor;
pub mod exporter;
pub mod expenses;
pub mod importer;
pub mod sales;
pub mod summary;
