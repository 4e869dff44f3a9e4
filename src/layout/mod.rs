//! Layouts map the record table to one target position and color per record.
//!
//! A [`LayoutSpec`] names fields by string, as written in configuration. It is resolved once
//! against the table header into a [`Layout`] holding typed [`FieldId`]s, so a misspelled field
//! fails at startup rather than mid-animation.

pub mod area;
pub mod bins;
pub mod geo;

use rand::Rng;

use crate::{
    color::{assign::assign_colors, ramp::ColorRamp},
    data::table::{FieldId, RecordTable},
    foundation::{
        core::{Canvas, Point, Rgb},
        error::ScatterResult,
    },
};

fn default_district() -> String {
    "IncidentDistrict".to_string()
}

fn default_outcome() -> String {
    "IncidentOutcome".to_string()
}

fn default_gender() -> String {
    "Gender".to_string()
}

/// Serializable layout description.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum LayoutSpec {
    Geographic {
        #[serde(default = "default_district")]
        color_field: String,
    },
    Bars {
        #[serde(default = "default_outcome")]
        field: String,
    },
    Grid {
        #[serde(default = "default_gender")]
        color_field: String,
    },
    Area {
        #[serde(default = "default_gender")]
        field: String,
        #[serde(default)]
        separate: bool,
    },
}

impl LayoutSpec {
    /// The cycle shown when nothing is configured: map, bars, latitude histogram.
    pub fn default_cycle() -> Vec<LayoutSpec> {
        vec![
            LayoutSpec::Geographic {
                color_field: default_district(),
            },
            LayoutSpec::Bars {
                field: default_outcome(),
            },
            LayoutSpec::Area {
                field: default_gender(),
                separate: false,
            },
        ]
    }

    pub fn resolve(&self, table: &RecordTable) -> ScatterResult<Layout> {
        Ok(match self {
            LayoutSpec::Geographic { color_field } => Layout::Geographic {
                color_field: table.field(color_field)?,
            },
            LayoutSpec::Bars { field } => Layout::Bars {
                field: table.field(field)?,
            },
            LayoutSpec::Grid { color_field } => Layout::Grid {
                color_field: table.field(color_field)?,
            },
            LayoutSpec::Area { field, separate } => Layout::Area {
                field: table.field(field)?,
                separate: *separate,
            },
        })
    }
}

/// A layout bound to one table's columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Geographic { color_field: FieldId },
    Bars { field: FieldId },
    Grid { color_field: FieldId },
    Area { field: FieldId, separate: bool },
}

/// Target state for one transition: `positions[i]` and `colors[i]` belong to record `i`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Arrangement {
    pub positions: Vec<Point>,
    pub colors: Vec<Rgb>,
}

impl Arrangement {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Geographic { .. } => "geographic",
            Layout::Bars { .. } => "bars",
            Layout::Grid { .. } => "grid",
            Layout::Area { .. } => "area",
        }
    }

    /// Compute target positions and colors. `prior` holds the current end positions and is
    /// only consulted for records a binned layout cannot place.
    pub fn arrange(
        &self,
        table: &RecordTable,
        canvas: Canvas,
        prior: &[Point],
        ramp: ColorRamp,
        rng: &mut impl Rng,
    ) -> Arrangement {
        match *self {
            Layout::Geographic { color_field } => Arrangement {
                positions: geo::geo_layout(table, canvas),
                colors: assign_colors(table, color_field, ramp, rng),
            },
            Layout::Bars { field } => {
                let placed = bins::bars_layout(table, canvas, field, prior);
                let mut colors = assign_colors(table, field, ramp, rng);
                placed.mask_unbinned(&mut colors);
                Arrangement {
                    positions: placed.positions,
                    colors,
                }
            }
            Layout::Grid { color_field } => Arrangement {
                positions: bins::grid_layout(table, canvas).positions,
                colors: assign_colors(table, color_field, ramp, rng),
            },
            Layout::Area { field, separate } => Arrangement {
                positions: area::area_layout(table, canvas, field, separate),
                colors: assign_colors(table, field, ramp, rng),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mod.rs"]
mod tests;
