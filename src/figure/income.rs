//! Income-group trends linked to growth-since-baseline bars

use super::{build_error, canonical_order, Figure};
use crate::aggregate::{growth_since, weighted_by_year_category};
use crate::plot::{layer, vconcat, Chart, Field, FieldType, Mark, MarkType, Selection};
use crate::reader::observation::stratified_rows;
use crate::{naming, DataFrame, Result};
use polars::prelude::*;
use serde_json::{json, Value};

/// Canonical order of the income bands, lowest first
pub const INCOME_ORDER: [&str; 6] = [
    "Less than $15,000",
    "$15,000 - $24,999",
    "$25,000 - $34,999",
    "$35,000 - $49,999",
    "$50,000 - $74,999",
    "$75,000 or greater",
];

/// Weighted rate per income band over time, stacked above the change of each
/// band since 2011 for the hovered year.
///
/// Expects `YearStart`, `Stratification1`, `Data_Value` and `Sample_Size`.
/// Bands with no 2011 rate keep their trend but have no growth bar.
pub fn income_gap(table: &DataFrame) -> Result<Figure> {
    let extraction = stratified_rows(table)?;
    let points = weighted_by_year_category(&extraction.rows);
    let growth = growth_since(&points, naming::BASELINE_YEAR);

    let order = canonical_order(
        &INCOME_ORDER,
        growth.iter().map(|g| g.category.as_str()),
        naming::STRATIFICATION,
    );

    let data = df! {
        naming::YEAR_START => growth.iter().map(|g| g.year).collect::<Vec<_>>(),
        naming::STRATIFICATION => growth.iter().map(|g| g.category.as_str()).collect::<Vec<_>>(),
        naming::DATA_VALUE => growth.iter().map(|g| g.current).collect::<Vec<_>>(),
        naming::BASELINE_RATE => growth.iter().map(|g| g.baseline).collect::<Vec<_>>(),
        naming::GROWTH => growth.iter().map(|g| g.growth).collect::<Vec<_>>(),
    }
    .map_err(build_error)?;

    let hover = Selection::hover(naming::HOVER_INCOME, naming::YEAR_START);
    let year = Field::new(naming::YEAR_START, FieldType::Ordinal);
    // Same domain in both views keeps each band's color stable
    let palette: Value = json!({"scheme": "tableau10", "domain": order});

    // ---- Top: income trends ----
    let base = Chart::new(naming::INCOME_DATASET)
        .encode(
            "x",
            year.clone()
                .title("Year")
                .axis(json!({"labelAngle": 0})),
        )
        .encode(
            "y",
            Field::new(naming::DATA_VALUE, FieldType::Quantitative)
                .title("Obesity rate (%)")
                .scale(json!({"domain": [20, 45]})),
        )
        .encode(
            "color",
            Field::new(naming::STRATIFICATION, FieldType::Nominal)
                .title("Income")
                .sort(&order)
                .scale(palette.clone()),
        );

    let lines = base.mark(Mark::new(MarkType::Line).with("strokeWidth", 3));

    let selectors = Chart::new(naming::INCOME_DATASET)
        .mark(Mark::new(MarkType::Point))
        .encode("x", year.clone())
        .encode("opacity", json!({"value": 0}))
        .add_selection(&hover);

    let rule = Chart::new(naming::INCOME_DATASET)
        .mark(Mark::new(MarkType::Rule).with("color", "gray"))
        .encode("x", year)
        .filter(&hover);

    let top = layer(vec![lines, selectors, rule])
        .size(700, 250)
        .title("Step 1: Obesity trends by income group");

    // ---- Bottom: growth since the baseline year ----
    let bars = Chart::new(naming::INCOME_DATASET)
        .mark(Mark::new(MarkType::Bar))
        .encode(
            "x",
            Field::new(naming::GROWTH, FieldType::Quantitative)
                .title(format!(
                    "Increase since {} (percentage points)",
                    naming::BASELINE_YEAR
                ))
                .scale(json!({"domain": [0, 12]})),
        )
        .encode(
            "y",
            Field::new(naming::STRATIFICATION, FieldType::Nominal)
                .title(Value::Null)
                .sort(&order),
        )
        .encode(
            "color",
            Field::new(naming::STRATIFICATION, FieldType::Nominal)
                .legend(Value::Null)
                .scale(palette),
        )
        .tooltip(vec![
            Field::new(naming::STRATIFICATION, FieldType::Nominal).title("Income group"),
            Field::new(naming::DATA_VALUE, FieldType::Quantitative)
                .title("Current rate")
                .format(".1f"),
            Field::new(naming::GROWTH, FieldType::Quantitative)
                .title(format!("Increase since {}", naming::BASELINE_YEAR))
                .format(".1f"),
        ])
        .filter(&hover)
        .size(700, 250)
        .title(&format!(
            "Step 2: Who gained the most weight? (change vs {})",
            naming::BASELINE_YEAR
        ));

    Ok(Figure::new(vconcat(vec![top.into(), bars.into()]))
        .with_data(naming::INCOME_DATASET, data)
        .with_selection(hover))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::test_util::{f64_values, i64_values, str_values};
    use crate::plot::{ChartSpec, HoverState};

    fn table() -> DataFrame {
        df! {
            "YearStart" => &["2011", "2015", "2011", "2011", "2015", "2015"],
            "Stratification1" => &[
                "Less than $15,000",
                "Less than $15,000",
                "$75,000 or greater",
                "$75,000 or greater",
                "$75,000 or greater",
                "$50,000 - $74,999",
            ],
            "Data_Value" => &["30.0", "33.5", "22.0", "26.0", "27.5", "31.0"],
            "Sample_Size" => &["500", "450", "100", "100", "300", "abc"],
        }
        .unwrap()
    }

    fn growth_of(figure: &Figure, year: i64, band: &str) -> Option<f64> {
        let data = figure.dataset(naming::INCOME_DATASET).unwrap();
        let years = i64_values(data, "YearStart");
        let bands = str_values(data, "Stratification1");
        let growth = f64_values(data, "Growth");
        (0..years.len())
            .find(|&i| years[i] == year && bands[i] == band)
            .and_then(|i| growth[i])
    }

    #[test]
    fn test_growth_since_2011() {
        let figure = income_gap(&table()).unwrap();
        assert_eq!(growth_of(&figure, 2015, "Less than $15,000"), Some(3.5));
        // 2011 baseline for $75,000+ is (22 + 26) / 2 = 24
        assert_eq!(growth_of(&figure, 2015, "$75,000 or greater"), Some(3.5));
    }

    #[test]
    fn test_growth_zero_at_baseline() {
        let figure = income_gap(&table()).unwrap();
        for band in ["Less than $15,000", "$75,000 or greater"] {
            assert_eq!(growth_of(&figure, 2011, band), Some(0.0));
        }
    }

    #[test]
    fn test_band_without_baseline_keeps_its_row() {
        let df = df! {
            "YearStart" => &["2011", "2013"],
            "Stratification1" => &["Less than $15,000", "$15,000 - $24,999"],
            "Data_Value" => &["30.0", "32.0"],
            "Sample_Size" => &["10", "10"],
        }
        .unwrap();

        let figure = income_gap(&df).unwrap();
        let data = figure.dataset(naming::INCOME_DATASET).unwrap();
        assert_eq!(data.height(), 2);
        assert_eq!(f64_values(data, "Base_2011"), vec![Some(30.0), None]);
        assert_eq!(f64_values(data, "Growth"), vec![Some(0.0), None]);
    }

    #[test]
    fn test_bars_follow_hover_state() {
        let figure = income_gap(&table()).unwrap();

        let bars = figure
            .linked_rows(naming::INCOME_DATASET, &HoverState::new())
            .unwrap();
        assert_eq!(bars.height(), 0);

        let bars = figure
            .linked_rows(naming::INCOME_DATASET, &HoverState::at(2015))
            .unwrap();
        assert_eq!(
            str_values(&bars, "Stratification1"),
            vec!["$75,000 or greater", "Less than $15,000"]
        );
    }

    #[test]
    fn test_consistent_colors_and_order() {
        let figure = income_gap(&table()).unwrap();
        let ChartSpec::VConcat(views) = figure.chart() else {
            panic!("Expected vconcat");
        };
        let ChartSpec::Layer(top) = &views[0] else {
            panic!("Expected a layered trend");
        };
        let ChartSpec::Unit(bars) = &views[1] else {
            panic!("Expected unit bars");
        };

        let top_color = top.charts()[0].encoding("color").unwrap();
        let bar_color = bars.encoding("color").unwrap();
        assert_eq!(top_color["scale"], bar_color["scale"]);
        assert_eq!(top_color["scale"]["domain"], json!(INCOME_ORDER));
        assert_eq!(bars.encoding("y").unwrap()["sort"], json!(INCOME_ORDER));
        assert_eq!(bar_color["legend"], Value::Null);
    }

    #[test]
    fn test_growth_tooltip() {
        let figure = income_gap(&table()).unwrap();
        let value = figure.chart().to_value();
        let tooltip = value["vconcat"][1]["encoding"]["tooltip"].as_array().unwrap();

        assert_eq!(tooltip[0]["field"], "Stratification1");
        assert_eq!(tooltip[1]["title"], "Current rate");
        assert_eq!(tooltip[2]["title"], "Increase since 2011");
        assert!(tooltip[1..].iter().all(|t| t["format"] == ".1f"));
        assert_eq!(
            value["vconcat"][1]["transform"][0],
            json!({"filter": {"param": "hover_inc", "empty": false}})
        );
    }
}
