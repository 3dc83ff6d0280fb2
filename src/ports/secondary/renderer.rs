/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use crate::domain::{ChartError, Figure};
use std::path::Path;

/// Secondary port - Chart rendering abstraction
///
/// The domain describes what to draw as a [`Figure`]; implementations decide
/// how pixels end up on disk.
pub trait ChartRenderer: Send + Sync {
    /// Render a figure into an image file, replacing any existing file
    ///
    /// # Arguments
    /// * `figure` - Panels, grid layout and physical size
    /// * `path` - Destination image path
    ///
    /// # Returns
    /// * `Ok(())` - Image written
    /// * `Err(ChartError)` - Backend or file system failure
    fn render(&self, figure: &Figure, path: &Path) -> Result<(), ChartError>;
}
