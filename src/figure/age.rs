//! Age-group heatmap

use super::{build_error, canonical_order, Figure};
use crate::aggregate::weighted_by_year_category;
use crate::plot::{Chart, Field, FieldType, Mark, MarkType};
use crate::reader::observation::stratified_rows;
use crate::{naming, DataFrame, Result};
use polars::prelude::*;
use serde_json::json;

/// Canonical top-to-bottom order of the age bands
pub const AGE_ORDER: [&str; 6] = [
    "18 - 24",
    "25 - 34",
    "35 - 44",
    "45 - 54",
    "55 - 64",
    "65 or older",
];

/// Heatmap of the weighted obesity rate by year and age band.
///
/// Expects `YearStart`, `Stratification1`, `Data_Value` and `Sample_Size`.
/// Bands outside [`AGE_ORDER`] are kept and placed after it.
pub fn age_heatmap(table: &DataFrame) -> Result<Figure> {
    let extraction = stratified_rows(table)?;
    let points = weighted_by_year_category(&extraction.rows);

    let order = canonical_order(
        &AGE_ORDER,
        points.iter().filter_map(|p| p.category.as_deref()),
        naming::AGE_GROUP,
    );

    let years: Vec<i64> = points.iter().map(|p| p.year).collect();
    let groups: Vec<&str> = points
        .iter()
        .map(|p| p.category.as_deref().unwrap_or_default())
        .collect();
    let rates: Vec<f64> = points.iter().map(|p| p.rate).collect();

    let data = df! {
        naming::YEAR => years,
        naming::AGE_GROUP => groups,
        naming::OBESITY_RATE => rates,
    }
    .map_err(build_error)?;

    let chart = Chart::new(naming::AGE_DATASET)
        .mark(Mark::new(MarkType::Rect))
        .encode(
            "x",
            Field::new(naming::YEAR, FieldType::Ordinal)
                .title("Year")
                .axis(json!({"labelAngle": 0})),
        )
        .encode(
            "y",
            Field::new(naming::AGE_GROUP, FieldType::Nominal)
                .title("Age group")
                .sort(&order),
        )
        .encode(
            "color",
            Field::new(naming::OBESITY_RATE, FieldType::Quantitative)
                .title("Obesity rate (%)")
                .scale(json!({"scheme": "yelloworangebrown"})),
        )
        .tooltip(vec![
            Field::new(naming::YEAR, FieldType::Ordinal).title("Year"),
            Field::new(naming::AGE_GROUP, FieldType::Nominal).title("Age group"),
            Field::new(naming::OBESITY_RATE, FieldType::Quantitative)
                .title("Obesity (%)")
                .format(".1f"),
        ])
        .size(500, 320)
        .title("Adult obesity by age group over time (US average)");

    Ok(Figure::new(chart.into()).with_data(naming::AGE_DATASET, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::test_util::{f64_values, i64_values, str_values};
    use crate::plot::ChartSpec;

    fn table() -> DataFrame {
        df! {
            "YearStart" => &["2015", "2015", "2015", "2014", "2015"],
            "Stratification1" => &["18 - 24", "18 - 24", "65 or older", "45 - 54", "45 - 54"],
            "Data_Value" => &["28.0", "32.0", "27.0", "35.5", "38.0"],
            "Sample_Size" => &["100", "300", "n/a", "40", "60"],
        }
        .unwrap()
    }

    #[test]
    fn test_weighted_rate_per_cell() {
        let figure = age_heatmap(&table()).unwrap();
        let data = figure.dataset(naming::AGE_DATASET).unwrap();

        assert_eq!(i64_values(data, "year"), vec![2014, 2015, 2015]);
        assert_eq!(str_values(data, "age_group"), vec!["45 - 54", "18 - 24", "45 - 54"]);
        assert_eq!(
            f64_values(data, "obesity_rate"),
            vec![Some(35.5), Some(31.0), Some(38.0)]
        );
    }

    #[test]
    fn test_age_groups_within_canonical_list() {
        let figure = age_heatmap(&table()).unwrap();
        let data = figure.dataset(naming::AGE_DATASET).unwrap();
        for group in str_values(data, "age_group") {
            assert!(AGE_ORDER.contains(&group.as_str()), "{}", group);
        }
    }

    #[test]
    fn test_encoding() {
        let figure = age_heatmap(&table()).unwrap();
        let ChartSpec::Unit(chart) = figure.chart() else {
            panic!("Expected a unit chart");
        };

        assert_eq!(chart.mark_type(), Some(MarkType::Rect));
        let x = chart.encoding("x").unwrap();
        assert_eq!(x["type"], "ordinal");
        assert_eq!(x["axis"]["labelAngle"], 0);

        let y = chart.encoding("y").unwrap();
        assert_eq!(y["sort"], json!(AGE_ORDER));

        let color = chart.encoding("color").unwrap();
        assert_eq!(color["scale"]["scheme"], "yelloworangebrown");

        let tooltip = chart.encoding("tooltip").unwrap().as_array().unwrap();
        assert_eq!(tooltip.len(), 3);
        assert_eq!(tooltip[2]["format"], ".1f");
    }

    #[test]
    fn test_unknown_age_group_appended() {
        let df = df! {
            "YearStart" => &["2015", "2015"],
            "Stratification1" => &["18 - 24", "Unknown"],
            "Data_Value" => &["28.0", "20.0"],
            "Sample_Size" => &["100", "100"],
        }
        .unwrap();

        let figure = age_heatmap(&df).unwrap();
        let ChartSpec::Unit(chart) = figure.chart() else {
            panic!("Expected a unit chart");
        };
        let sort = chart.encoding("y").unwrap()["sort"].as_array().unwrap().clone();
        assert_eq!(sort.len(), 7);
        assert_eq!(sort[6], "Unknown");
    }
}
