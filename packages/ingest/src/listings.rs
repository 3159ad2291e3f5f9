//! Listing table parser.
//!
//! Parses the public NYC Airbnb CSV into [`Listing`] rows. Column lookup is
//! by header name, so column order and extra columns do not matter. Any
//! required column that is missing, or any required cell that is empty or
//! invalid, aborts the load with the offending field and row.

use std::io::Read;
use std::path::Path;

use airbnb_insights_listing_models::Listing;

use crate::IngestError;
use crate::progress::ProgressCallback;

/// Columns every listing row must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "latitude",
    "longitude",
    "price",
    "neighbourhood",
    "neighbourhood_group",
    "number_of_reviews",
    "review_scores_rating",
];

/// Header positions of the columns the parser reads.
struct ColumnMap {
    latitude: usize,
    longitude: usize,
    price: usize,
    neighbourhood: usize,
    neighbourhood_group: usize,
    number_of_reviews: usize,
    review_scores_rating: usize,
    id: Option<usize>,
    name: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self, IngestError> {
        let find = |field: &str| headers.iter().position(|h| h == field);
        let require = |field: &'static str| find(field).ok_or(IngestError::MissingColumn { field });

        Ok(Self {
            latitude: require("latitude")?,
            longitude: require("longitude")?,
            price: require("price")?,
            neighbourhood: require("neighbourhood")?,
            neighbourhood_group: require("neighbourhood_group")?,
            number_of_reviews: require("number_of_reviews")?,
            review_scores_rating: require("review_scores_rating")?,
            id: find("id"),
            name: find("name"),
        })
    }
}

/// Loads listings from a CSV file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row fails
/// validation (see [`parse_listings_csv`]).
pub fn load_listings_csv(
    path: &Path,
    progress: &dyn ProgressCallback,
) -> Result<Vec<Listing>, IngestError> {
    let file = std::fs::File::open(path)?;
    progress.set_total(file.metadata()?.len());
    log::debug!("Reading listings from {}", path.display());
    parse_listings_csv(file, progress)
}

/// Parses listings from CSV content.
///
/// Progress is reported in bytes consumed.
///
/// # Errors
///
/// * [`IngestError::MissingColumn`] if a required column is absent.
/// * [`IngestError::MissingField`] if a required cell is empty.
/// * [`IngestError::InvalidValue`] if a number does not parse, a
///   coordinate is out of range, or a price or review count is negative.
/// * [`IngestError::Csv`] if the CSV itself is malformed.
pub fn parse_listings_csv<R: Read>(
    reader: R,
    progress: &dyn ProgressCallback,
) -> Result<Vec<Listing>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let columns = ColumnMap::from_headers(&headers)?;

    progress.set_message("Parsing listings".to_string());

    let mut listings = Vec::new();
    let mut last_byte = reader.position().byte();
    let mut record = csv::StringRecord::new();
    let mut row: u64 = 0;

    while reader.read_record(&mut record)? {
        row += 1;
        listings.push(parse_row(&record, &columns, row)?);

        let byte = reader.position().byte();
        progress.inc(byte - last_byte);
        last_byte = byte;
    }

    log::info!("Parsed {} listings", listings.len());
    progress.finish(format!("Loaded {} listings", listings.len()));

    Ok(listings)
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    row: u64,
) -> Result<Listing, IngestError> {
    let latitude = parse_number(
        required(record, columns.latitude, "latitude", row)?,
        "latitude",
        row,
    )?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(invalid("latitude", row, latitude.to_string(), "outside [-90, 90]"));
    }

    let longitude = parse_number(
        required(record, columns.longitude, "longitude", row)?,
        "longitude",
        row,
    )?;
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(invalid("longitude", row, longitude.to_string(), "outside [-180, 180]"));
    }

    let price = parse_price(required(record, columns.price, "price", row)?, row)?;

    let number_of_reviews = parse_count(
        required(record, columns.number_of_reviews, "number_of_reviews", row)?,
        "number_of_reviews",
        row,
    )?;

    let review_scores_rating = parse_number(
        required(record, columns.review_scores_rating, "review_scores_rating", row)?,
        "review_scores_rating",
        row,
    )?;

    let id = columns
        .id
        .and_then(|idx| record.get(idx))
        .and_then(|value| parse_id(value, row));

    let name = columns
        .name
        .and_then(|idx| record.get(idx))
        .map_or_else(String::new, |value| value.trim().to_owned());

    Ok(Listing {
        id,
        name,
        latitude,
        longitude,
        price,
        neighbourhood: required(record, columns.neighbourhood, "neighbourhood", row)?.to_owned(),
        neighbourhood_group: required(
            record,
            columns.neighbourhood_group,
            "neighbourhood_group",
            row,
        )?
        .to_owned(),
        number_of_reviews,
        review_scores_rating,
    })
}

/// Returns the trimmed cell, or [`IngestError::MissingField`] if it is empty
/// or the row is too short to contain it.
fn required<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    field: &'static str,
    row: u64,
) -> Result<&'r str, IngestError> {
    match record.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(IngestError::MissingField { field, row }),
    }
}

fn invalid(field: &'static str, row: u64, value: String, reason: &str) -> IngestError {
    IngestError::InvalidValue {
        field,
        row,
        value,
        reason: reason.to_string(),
    }
}

fn parse_number(value: &str, field: &'static str, row: u64) -> Result<f64, IngestError> {
    let number = value
        .parse::<f64>()
        .map_err(|e| invalid(field, row, value.to_owned(), &e.to_string()))?;
    if !number.is_finite() {
        return Err(invalid(field, row, value.to_owned(), "not a finite number"));
    }
    Ok(number)
}

/// Parses a price, tolerating a leading `$` and thousands separators.
fn parse_price(value: &str, row: u64) -> Result<f64, IngestError> {
    let cleaned: String = value
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let price = parse_number(cleaned.trim(), "price", row)
        .map_err(|_| invalid("price", row, value.to_owned(), "not a number"))?;
    if price < 0.0 {
        return Err(invalid("price", row, value.to_owned(), "negative price"));
    }
    Ok(price)
}

/// Parses the optional listing id. Integral floats (`"2539.0"`) are
/// accepted; anything else leaves the id unset.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn parse_id(value: &str, row: u64) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(id) = value.parse::<u64>() {
        return Some(id);
    }

    match value.parse::<f64>() {
        Ok(number) if number >= 0.0 && number.fract() == 0.0 && number < u64::MAX as f64 => {
            Some(number as u64)
        }
        _ => {
            log::debug!("Ignoring unusable id '{value}' in row {row}");
            None
        }
    }
}

/// Parses a non-negative count. Accepts integral floats (`"12.0"`), which
/// appear when the column passed through a float-typed export.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(value: &str, field: &'static str, row: u64) -> Result<u32, IngestError> {
    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }

    let number = parse_number(value, field, row)?;
    if number < 0.0 {
        return Err(invalid(field, row, value.to_owned(), "negative count"));
    }
    if number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return Err(invalid(field, row, value.to_owned(), "not a whole number"));
    }

    Ok(number as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;

    const HEADER: &str = "id,name,host_id,neighbourhood_group,neighbourhood,latitude,longitude,room_type,price,number_of_reviews,review_scores_rating";

    fn parse(body: &str) -> Result<Vec<Listing>, IngestError> {
        let csv = format!("{HEADER}\n{body}");
        parse_listings_csv(csv.as_bytes(), &NullProgress)
    }

    #[test]
    fn parses_rows_in_file_order() {
        let listings = parse(
            "2539,Clean & quiet apt,2787,Brooklyn,Kensington,40.64749,-73.97237,Private room,149,9,4.5\n\
             2595,Skylit Midtown Castle,2845,Manhattan,Midtown,40.75362,-73.98377,Entire home/apt,225,45,4.8\n",
        )
        .unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, Some(2539));
        assert_eq!(listings[0].name, "Clean & quiet apt");
        assert_eq!(listings[0].neighbourhood_group, "Brooklyn");
        assert_eq!(listings[0].number_of_reviews, 9);
        assert!((listings[0].latitude - 40.64749).abs() < 1e-9);
        assert!((listings[1].price - 225.0).abs() < f64::EPSILON);
        assert!((listings[1].review_scores_rating - 4.8).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_table_is_ok() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn missing_column_fails_fast() {
        let csv = "id,name,latitude,longitude,price,neighbourhood,neighbourhood_group,number_of_reviews\n";
        let err = parse_listings_csv(csv.as_bytes(), &NullProgress).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingColumn {
                field: "review_scores_rating"
            }
        ));
    }

    #[test]
    fn empty_required_cell_reports_field_and_row() {
        let err = parse(
            "1,A,1,Queens,Astoria,40.76,-73.92,Private room,80,3,4.0\n\
             2,B,2,Queens,Astoria,40.76,-73.92,Private room,80,3,\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingField {
                field: "review_scores_rating",
                row: 2
            }
        ));
    }

    #[test]
    fn short_row_is_missing_field() {
        let err = parse("1,A,1,Queens,Astoria,40.76,-73.92\n").unwrap_err();
        assert!(matches!(err, IngestError::MissingField { field: "price", row: 1 }));
    }

    #[test]
    fn id_accepts_integral_float_and_drops_garbage() {
        let listings = parse(
            "2539.0,A,1,Bronx,Mott Haven,40.81,-73.92,Private room,60,0,0\n\
             n/a,B,1,Bronx,Mott Haven,40.81,-73.92,Private room,60,0,0\n\
             12.5,C,1,Bronx,Mott Haven,40.81,-73.92,Private room,60,0,0\n",
        )
        .unwrap();
        let ids: Vec<Option<u64>> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids, [Some(2539), None, None]);
    }

    #[test]
    fn optional_columns_may_be_blank() {
        let listings = parse(",,1,Bronx,Mott Haven,40.81,-73.92,Private room,60,0,0\n").unwrap();
        assert_eq!(listings[0].id, None);
        assert_eq!(listings[0].name, "");
    }

    #[test]
    fn accepts_currency_formatted_price() {
        let listings =
            parse("1,A,1,Manhattan,SoHo,40.72,-74.0,Entire home/apt,\"$1,200.00\",5,4.9\n").unwrap();
        assert!((listings[0].price - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_zero_price() {
        let listings = parse("1,A,1,Manhattan,SoHo,40.72,-74.0,Shared room,0,5,5\n").unwrap();
        assert!(listings[0].price.abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_negative_price() {
        let err = parse("1,A,1,Manhattan,SoHo,40.72,-74.0,Shared room,-5,5,5\n").unwrap_err();
        assert!(matches!(err, IngestError::InvalidValue { field: "price", row: 1, .. }));
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = parse("1,A,1,Manhattan,SoHo,140.72,-74.0,Shared room,50,5,5\n").unwrap_err();
        assert!(matches!(err, IngestError::InvalidValue { field: "latitude", .. }));
    }

    #[test]
    fn review_count_accepts_integral_float_only() {
        let listings =
            parse("1,A,1,Queens,Astoria,40.76,-73.92,Private room,80,12.0,4.0\n").unwrap();
        assert_eq!(listings[0].number_of_reviews, 12);

        let err = parse("1,A,1,Queens,Astoria,40.76,-73.92,Private room,80,1.5,4.0\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::InvalidValue {
                field: "number_of_reviews",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_numeric_rating() {
        let err = parse("1,A,1,Queens,Astoria,40.76,-73.92,Private room,80,3,great\n").unwrap_err();
        assert!(err.to_string().contains("review_scores_rating"), "{err}");
    }

    #[test]
    fn headers_are_trimmed() {
        let csv = " latitude , longitude ,price,neighbourhood,neighbourhood_group,number_of_reviews,review_scores_rating\n\
                   40.7,-74.0,100,Chelsea,Manhattan,1,5\n";
        let listings = parse_listings_csv(csv.as_bytes(), &NullProgress).unwrap();
        assert_eq!(listings[0].neighbourhood, "Chelsea");
    }
}
