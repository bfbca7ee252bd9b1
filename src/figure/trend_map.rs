//! National trend linked to a per-state map
//!
//! The top view shows the national rate per year. Hovering it selects the
//! nearest year, which reveals that year's states on the map below. With no
//! year selected the map draws nothing.

use super::{build_error, Figure};
use crate::aggregate::mean_by_year;
use crate::plot::region::{region_id, states_lookup};
use crate::plot::{layer, vconcat, Chart, Field, FieldType, Mark, MarkType, Selection};
use crate::reader::observation::regional_rows;
use crate::reader::RegionalRow;
use crate::{naming, DataFrame, Result};
use polars::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

/// Trend of the national rate stacked above a state map for the hovered year.
///
/// Expects `YearStart`, `LocationAbbr`, `LocationDesc` and `Data_Value`. The
/// national rate is the plain mean of all rows of a year; sample sizes play
/// no part here. States without a FIPS id are left off the map but still count
/// towards the national rate.
pub fn trend_and_map(table: &DataFrame) -> Result<Figure> {
    let extraction = regional_rows(table)?;

    let trend = mean_by_year(&extraction.rows);
    let trend_data = df! {
        naming::YEAR_START => trend.iter().map(|p| p.year).collect::<Vec<_>>(),
        naming::NATIONAL_RATE => trend.iter().map(|p| p.rate).collect::<Vec<_>>(),
    }
    .map_err(build_error)?;

    let map_data = map_frame(&extraction.rows)?;

    let hover = Selection::hover(naming::HOVER_YEAR, naming::YEAR_START);
    let year = Field::new(naming::YEAR_START, FieldType::Ordinal);

    // ---- Top: national average trend ----
    let base = Chart::new(naming::TREND_DATASET)
        .encode(
            "x",
            year.clone()
                .title("Year")
                .axis(json!({"labelAngle": 0})),
        )
        .encode(
            "y",
            Field::new(naming::NATIONAL_RATE, FieldType::Quantitative)
                .title("National average obesity rate (%)")
                .scale(json!({"domain": [25, 35]})),
        );

    let line = base.mark(Mark::new(MarkType::Line).with("color", "#c0392b"));

    let selectors = Chart::new(naming::TREND_DATASET)
        .mark(Mark::new(MarkType::Point))
        .encode("x", year.clone())
        .encode("opacity", json!({"value": 0}))
        .add_selection(&hover);

    let points = line
        .mark(
            Mark::new(MarkType::Point)
                .with("size", 80)
                .with("color", "black"),
        )
        .encode(
            "opacity",
            hover.condition(json!({"value": 1}), json!({"value": 0})),
        );

    let rule = Chart::new(naming::TREND_DATASET)
        .mark(Mark::new(MarkType::Rule).with("color", "gray"))
        .encode("x", year)
        .filter(&hover);

    let text = base
        .mark(
            Mark::new(MarkType::Text)
                .with("align", "left")
                .with("dx", 5)
                .with("dy", -15),
        )
        .encode(
            "text",
            hover.condition(
                Field::new(naming::NATIONAL_RATE, FieldType::Quantitative)
                    .format(".1f")
                    .into(),
                json!({"value": " "}),
            ),
        );

    let top = layer(vec![line, selectors, points, rule, text])
        .size(700, 200)
        .title("Step 1: Hover over the line to select a year");

    // ---- Bottom: state map for the hovered year ----
    let map = Chart::new(naming::MAP_DATASET)
        .mark(
            Mark::new(MarkType::Geoshape)
                .with("stroke", "white")
                .with("strokeWidth", 0.5),
        )
        .encode(
            "color",
            Field::new(naming::DATA_VALUE, FieldType::Quantitative)
                .title("Obesity rate (%)")
                .scale(json!({"scheme": "reds", "domain": [20, 45]})),
        )
        .tooltip(vec![
            Field::new(naming::LOCATION_DESC, FieldType::Nominal).title("State"),
            Field::new(naming::DATA_VALUE, FieldType::Quantitative)
                .title("Obesity (%)")
                .format(".1f"),
        ])
        .lookup(naming::REGION_ID, states_lookup())
        .filter(&hover)
        .property("projection", json!({"type": "albersUsa"}))
        .size(700, 400)
        .title("Step 2: Map updates for the selected year");

    Ok(Figure::new(vconcat(vec![top.into(), map.into()]))
        .with_data(naming::TREND_DATASET, trend_data)
        .with_data(naming::MAP_DATASET, map_data)
        .with_selection(hover))
}

/// Rows that can be placed on the map, with their FIPS id
fn map_frame(rows: &[RegionalRow]) -> Result<DataFrame> {
    let mut unknown: BTreeMap<&str, usize> = BTreeMap::new();
    let mut mapped: Vec<(&RegionalRow, i64)> = Vec::with_capacity(rows.len());
    for row in rows {
        match region_id(&row.abbr) {
            Some(id) => mapped.push((row, id)),
            None => *unknown.entry(row.abbr.as_str()).or_default() += 1,
        }
    }

    for (abbr, count) in &unknown {
        tracing::warn!(abbr, rows = count, "No region id for abbreviation; left off the map");
    }

    df! {
        naming::YEAR_START => mapped.iter().map(|(r, _)| r.year).collect::<Vec<_>>(),
        naming::LOCATION_ABBR => mapped.iter().map(|(r, _)| r.abbr.as_str()).collect::<Vec<_>>(),
        naming::LOCATION_DESC => mapped.iter().map(|(r, _)| r.name.as_str()).collect::<Vec<_>>(),
        naming::DATA_VALUE => mapped.iter().map(|(r, _)| r.value).collect::<Vec<_>>(),
        naming::REGION_ID => mapped.iter().map(|(_, id)| *id).collect::<Vec<_>>(),
    }
    .map_err(build_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::rendered_regions;
    use crate::figure::test_util::{f64_values, i64_values};
    use crate::plot::{ChartSpec, HoverState};
    use std::collections::BTreeSet;

    fn table() -> DataFrame {
        df! {
            "YearStart" => &["2011", "2011", "2011", "2012", "2012", "2012"],
            "LocationAbbr" => &["AL", "CA", "ZZ", "AL", "CA", "GU"],
            "LocationDesc" => &["Alabama", "California", "Nowhere", "Alabama", "California", "Guam"],
            "Data_Value" => &["32.0", "24.0", "31.0", "33.0", "", "29.0"],
        }
        .unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trend_is_unweighted_mean_of_all_rows() {
        let figure = trend_and_map(&table()).unwrap();
        let trend = figure.dataset(naming::TREND_DATASET).unwrap();

        assert_eq!(i64_values(trend, "YearStart"), vec![2011, 2012]);
        // 2011: (32 + 24 + 31) / 3, unmapped ZZ included
        // 2012: (33 + 29) / 2, CA has no value
        assert_eq!(
            f64_values(trend, "national_rate"),
            vec![Some(29.0), Some(31.0)]
        );
    }

    #[test]
    fn test_unknown_region_dropped_from_map() {
        let figure = trend_and_map(&table()).unwrap();
        let map = figure.dataset(naming::MAP_DATASET).unwrap();

        assert_eq!(map.height(), 3);
        assert_eq!(i64_values(map, "id"), vec![1, 6, 1]);
    }

    #[test]
    fn test_empty_selection_renders_no_regions() {
        let figure = trend_and_map(&table()).unwrap();
        let regions = rendered_regions(&figure, &HoverState::new()).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_selected_year_renders_mapped_regions() {
        let figure = trend_and_map(&table()).unwrap();

        let regions = rendered_regions(&figure, &HoverState::at(2011)).unwrap();
        assert_eq!(regions, set(&["AL", "CA"]));

        let regions = rendered_regions(&figure, &HoverState::at(2012)).unwrap();
        assert_eq!(regions, set(&["AL"]));
    }

    #[test]
    fn test_hover_then_leave() {
        let figure = trend_and_map(&table()).unwrap();
        let mut state = HoverState::new();

        state.pointer_over(&[2011, 2012], 2011.3);
        assert_eq!(
            rendered_regions(&figure, &state).unwrap(),
            set(&["AL", "CA"])
        );

        state.pointer_out();
        assert!(rendered_regions(&figure, &state).unwrap().is_empty());
    }

    #[test]
    fn test_views_share_only_the_selection() {
        let figure = trend_and_map(&table()).unwrap();
        let ChartSpec::VConcat(views) = figure.chart() else {
            panic!("Expected vconcat");
        };
        assert_eq!(views.len(), 2);

        let ChartSpec::Layer(top) = &views[0] else {
            panic!("Expected a layered trend");
        };
        assert_eq!(top.charts().len(), 5);
        let owners: Vec<_> = top
            .charts()
            .iter()
            .filter(|c| !c.params().is_empty())
            .collect();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].params()[0]["name"], "hover_year");

        let ChartSpec::Unit(map) = &views[1] else {
            panic!("Expected a unit map");
        };
        assert_eq!(map.mark_type(), Some(MarkType::Geoshape));
        assert_eq!(map.dataset(), Some(naming::MAP_DATASET));
        assert!(map.params().is_empty());
        assert_eq!(
            map.transforms()[1],
            json!({"filter": {"param": "hover_year", "empty": false}})
        );
        let color = map.encoding("color").unwrap();
        assert_eq!(color["scale"]["domain"], json!([20, 45]));
    }

    #[test]
    fn test_map_lookup_joins_state_geometry() {
        let figure = trend_and_map(&table()).unwrap();
        let value = figure.chart().to_value();
        let lookup = &value["vconcat"][1]["transform"][0];

        assert_eq!(lookup["lookup"], "id");
        assert_eq!(lookup["from"]["key"], "id");
        assert_eq!(lookup["from"]["data"]["format"]["feature"], "states");
        assert_eq!(value["vconcat"][1]["projection"]["type"], "albersUsa");
    }
}
