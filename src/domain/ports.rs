use chrono::NaiveDate;

use crate::core::density::{DensityParams, Window};
use crate::core::heat_map::{HeatMap, RowOrder};
use crate::core::registry::Gameplan;
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn teams_file(&self) -> &str;
    fn venues_file(&self) -> &str;
    fn fixtures_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn start(&self) -> usize;
    /// `None` means "up to the highest match id in the schedule".
    fn max_matches(&self) -> Option<usize>;
    fn density_params(&self) -> DensityParams;
    fn row_order(&self) -> RowOrder;
    fn as_of(&self) -> Option<NaiveDate>;
    fn color(&self) -> bool;

    /// The configured window, with its end clamped to the highest match id.
    fn window_for(&self, gameplan: &Gameplan) -> Result<Window> {
        let last = gameplan.max_match_id() as usize;
        let max_matches = match self.max_matches() {
            Some(requested) if requested > last => {
                tracing::debug!("Clamping window end {} to last match {}", requested, last);
                last
            }
            Some(requested) => requested,
            None => last,
        };
        Window::new(self.start(), max_matches)
    }
}

/// Consumer of the ranked read model: terminal, JSON, or anything else.
pub trait Renderer {
    fn render(&self, gameplan: &Gameplan, heat_map: &HeatMap) -> Result<String>;
}
