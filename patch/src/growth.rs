use crate::{
    error::{Error, Result},
    patch::Patch,
    vertex::VertexId,
};
use atlas::Entry;
use geometry::Bounds;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use tile::Wedge;

// GrowthReport summarizes one call to Patch::grow
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct GrowthReport {
    pub steps: usize, // random placements committed
    pub rollbacks: usize, // random placements undone after a contradiction
    pub forced: usize, // tiles added because the matching rules left no choice
    pub tiles: usize, // tiles added in total
}

impl std::fmt::Display for GrowthReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tiles ({} chosen, {} forced) with {} rollbacks",
            self.tiles, self.steps, self.forced, self.rollbacks
        )
    }
}

impl Patch {
    // live_non_full_vertices_within lists the live vertices inside bounds with an open slot
    pub fn live_non_full_vertices_within(&self, bounds: &Bounds) -> Vec<VertexId> {
        self.live_non_full_vertices()
            .into_iter()
            .filter(|vertex| {
                self.vertex(*vertex)
                    .ok()
                    .and_then(|vertex| vertex.location())
                    .map_or(false, |location| bounds.contains(&location))
            })
            .collect()
    }

    // grow keeps placing random tiles around live non-full vertices inside bounds until there
    // are none left, or until max_steps placements have been committed
    pub fn grow<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) -> Result<GrowthReport> {
        let tiles = self.tiles().len();
        let mut report = GrowthReport::default();
        loop {
            if self.config().max_steps.map_or(false, |max_steps| report.steps >= max_steps) {
                break;
            }
            let candidates = self.live_non_full_vertices_within(bounds);
            if candidates.is_empty() {
                break;
            }
            let vertex = candidates[rng.gen_range(0..candidates.len())];
            let forced = self.step(vertex, rng, &mut report)?;
            report.steps += 1;
            report.forced += forced;
        }
        report.tiles = self.tiles().len() - tiles;
        log::info!("grew {} within {}", report, bounds);
        Ok(report)
    }

    // step commits one random placement at vertex, drawing again after every contradiction.
    // A placement that failed once is never drawn again, so a vertex whose every option fails
    // is reported as having no legal continuation.
    fn step<R: Rng + ?Sized>(&mut self, vertex: VertexId, rng: &mut R, report: &mut GrowthReport) -> Result<usize> {
        let mut tried: HashSet<(usize, Wedge)> = HashSet::new();
        loop {
            let (slot, wedge) = match self.draw(vertex, &tried, rng) {
                Some(draw) => draw,
                None => {
                    log::warn!("every placement at {} contradicts the tiling", vertex);
                    return Err(Error::NoLegalContinuation { vertex, retries: tried.len() });
                }
            };
            match self.place_counted(vertex, wedge, slot) {
                Ok((_, forced)) => return Ok(forced),
                Err(Error::Contradiction(contradiction)) => {
                    log::debug!("{} in slot {} of {}: {}", wedge, slot, vertex, contradiction);
                    report.rollbacks += 1;
                    tried.insert((slot, wedge));
                }
                Err(error) => return Err(error),
            }
            if let Some(max_retries) = self.config().max_retries {
                if tried.len() >= max_retries {
                    log::warn!("giving up on {} after {} retries", vertex, tried.len());
                    return Err(Error::NoLegalContinuation { vertex, retries: tried.len() });
                }
            }
        }
    }

    // draw picks a random open slot of vertex, then a random figure still possible there, and
    // returns the wedge that figure puts in the slot. Pairs in tried are never drawn.
    fn draw<R: Rng + ?Sized>(&self, vertex: VertexId, tried: &HashSet<(usize, Wedge)>, rng: &mut R) -> Option<(usize, Wedge)> {
        let vertex = self.vertex(vertex).ok()?;
        let catalog = vertex.catalog();
        let untried = |slot: usize, wedge: Wedge| !tried.contains(&(slot, wedge));

        let slots: Vec<usize> = vertex
            .open_slots()
            .into_iter()
            .filter(|slot| catalog.wedges_at(*slot).into_iter().any(|wedge| untried(*slot, wedge)))
            .collect();
        if slots.is_empty() {
            return None;
        }
        let slot = slots[rng.gen_range(0..slots.len())];

        let entries: Vec<&Entry> = catalog.iter().filter(|entry| untried(slot, entry.wedges[slot])).collect();
        if entries.is_empty() {
            return None;
        }
        Some((slot, entries[rng.gen_range(0..entries.len())].wedges[slot]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use geometry::{Point, ORIGIN};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_growth_draw_skips_tried() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let dart = patch.new_tile(Wedge::D0);
        patch.attach(seed, dart, Wedge::D0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let vertex = patch.vertex(seed).unwrap();
        let mut tried = HashSet::new();
        for slot in vertex.open_slots() {
            for wedge in vertex.catalog().wedges_at(slot) {
                tried.insert((slot, wedge));
            }
        }
        let (slot, wedge) = tried.iter().next().copied().unwrap();
        tried.remove(&(slot, wedge));

        assert_eq!(Some((slot, wedge)), patch.draw(seed, &tried, &mut rng));
        tried.insert((slot, wedge));
        assert_eq!(None, patch.draw(seed, &tried, &mut rng));
    }

    #[test]
    fn test_growth_draw_follows_catalog() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let dart = patch.new_tile(Wedge::D0);
        patch.attach(seed, dart, Wedge::D0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let (slot, wedge) = patch.draw(seed, &HashSet::new(), &mut rng).unwrap();
            let vertex = patch.vertex(seed).unwrap();
            assert_eq!(None, vertex.slot(slot));
            assert!(vertex.catalog().wedges_at(slot).contains(&wedge));
        }
    }

    #[test]
    fn test_growth_max_steps() {
        let mut patch = Patch::new(Config { max_steps: Some(2), max_retries: Some(100), ..Config::default() });
        patch.seed(ORIGIN);
        let mut rng = StdRng::seed_from_u64(3);

        let report = patch.grow(&Bounds::centered(&ORIGIN, 4.), &mut rng).unwrap();
        assert_eq!(2, report.steps);
        assert_eq!(patch.tiles().len(), report.tiles);
        assert_eq!(report.steps + report.forced, report.tiles);
        assert_eq!(Ok(()), patch.validate());
    }

    #[test]
    fn test_growth_nothing_to_do() {
        let mut patch = Patch::default();
        patch.seed(Point(5., 5.));
        let mut rng = StdRng::seed_from_u64(0);

        let report = patch.grow(&Bounds::centered(&ORIGIN, 1.), &mut rng).unwrap();
        assert_eq!(GrowthReport::default(), report);
        assert!(patch.tiles().is_empty());
    }

    #[test]
    fn test_growth_report_fmt() {
        let report = GrowthReport { steps: 3, rollbacks: 1, forced: 9, tiles: 12 };
        assert_eq!("12 tiles (3 chosen, 9 forced) with 1 rollbacks", format!("{}", report));
    }
}
