use serde::Deserialize;
use tracing::{debug, info};

use std::{
    collections::HashMap,
    fmt::{self, Display},
    fs::File,
    path::Path,
};

use crate::{
    error::{Error, Result},
    rating::{Average, Overflow, Rating},
};

const BRAND: &str = "brand";
const RATING: &str = "rating";

/// Builds the average rating report for the CSV files at `paths`.
///
/// Files are read in order, and the first error aborts the whole report.
///
/// # Errors
///
/// Returns any error from [`Ratings::read_csv`].
pub fn average_rating<P: AsRef<Path>>(paths: &[P]) -> Result<Report> {
    let mut ratings = Ratings::new();
    for path in paths {
        ratings.read_csv(path)?;
    }
    let report = ratings.report();
    info!(
        sources = paths.len(),
        brands = report.len(),
        "built average rating report"
    );
    Ok(report)
}

/// Accumulates ratings per brand.
///
/// To create a new, empty accumulator, use [`Ratings::new`].
///
/// To add rating data, use [`Ratings::read_csv`] or [`Ratings::add`].
///
/// To get the ranked result, use [`Ratings::report`].
#[derive(Debug, Default)]
pub struct Ratings {
    brands: Vec<(String, Average)>,
    index: HashMap<String, usize>,
}

impl Ratings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one rating for `brand`.
    ///
    /// Brands are remembered in the order they are first added, which
    /// decides the order of brands with equal averages in the report.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] if the sum of the brand's ratings goes out of
    /// range.
    pub fn add(
        &mut self,
        brand: impl Into<String>,
        rating: Rating,
    ) -> std::result::Result<(), Overflow> {
        let brand = brand.into();
        let slot = match self.index.get(&brand) {
            Some(&slot) => slot,
            None => {
                let slot = self.brands.len();
                self.index.insert(brand.clone(), slot);
                self.brands.push((brand, Average::default()));
                slot
            }
        };
        self.brands[slot].1.push(rating)
    }

    /// Reads rating data from the CSV file at `path`, and updates the
    /// accumulator.
    ///
    /// The file must have a header row. Only the `brand` and `rating`
    /// columns are used; any others are ignored.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file cannot be opened ([`Error::NotFound`])
    /// * A record is read but the header has no `brand` or `rating` column
    ///   ([`Error::MissingField`])
    /// * A `rating` value is not a decimal number ([`Error::Parse`])
    /// * A brand's ratings add up to more than a [`Rating`] can hold
    ///   ([`Error::Overflow`])
    /// * The file is not valid CSV ([`Error::Csv`])
    ///
    /// On error, ratings already added from earlier records of this file
    /// remain in the accumulator; [`average_rating`] discards it.
    pub fn read_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading ratings");
        let file = File::open(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let mut rdr = csv::Reader::from_reader(file);
        let csv_err = |source: csv::Error| Error::Csv {
            path: path.to_path_buf(),
            source,
        };
        let headers = rdr.headers().map_err(csv_err)?.clone();
        // Only an error once there is a record to read it from.
        let missing = [BRAND, RATING]
            .into_iter()
            .find(|&field| !headers.iter().any(|h| h == field));
        let mut records = 0;
        for result in rdr.records() {
            let row = result.map_err(csv_err)?;
            if let Some(field) = missing {
                return Err(Error::MissingField {
                    path: path.to_path_buf(),
                    field,
                });
            }
            let record: Record = row.deserialize(Some(&headers)).map_err(csv_err)?;
            let line = row.position().map_or(0, csv::Position::line);
            let rating = record.rating.parse::<Rating>().map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                line,
                value: record.rating.clone(),
                source,
            })?;
            self.add(record.brand.as_str(), rating).map_err(|source| Error::Overflow {
                path: path.to_path_buf(),
                line,
                brand: record.brand,
                value: record.rating,
                source,
            })?;
            records += 1;
        }
        debug!(path = %path.display(), records, "finished reading ratings");
        Ok(())
    }

    /// Returns the ranked report of average ratings per brand.
    ///
    /// Brands are sorted by average, highest first. Brands with equal
    /// averages keep the order in which they were first added.
    #[must_use]
    pub fn report(&self) -> Report {
        let mut entries: Vec<_> = self
            .brands
            .iter()
            .filter_map(|(brand, avg)| {
                avg.mean().map(|average| RankedEntry {
                    brand: brand.clone(),
                    average,
                })
            })
            .collect();
        entries.sort_by(|a, b| b.average.cmp(&a.average));
        Report { entries }
    }
}

/// Defines the CSV fields used from each rating record.
#[derive(Debug, Deserialize)]
struct Record {
    brand: String,
    rating: String,
}

/// A brand and its average rating, rounded to 2 decimal places.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RankedEntry {
    brand: String,
    average: Rating,
}

impl RankedEntry {
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn average(&self) -> Rating {
        self.average
    }
}

/// Brands ranked by average rating, highest first.
///
/// The rank of the entry at index `i` is `i + 1`; see [`Report::ranks`].
///
/// To get a printable table, use its [`Display`] implementation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    entries: Vec<RankedEntry>,
}

impl Report {
    #[must_use]
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the 1-based ranks of the entries, `1..=len`.
    #[must_use]
    pub fn ranks(&self) -> Vec<usize> {
        (1..=self.entries.len()).collect()
    }

    /// Splits the report into its entries and their ranks.
    #[must_use]
    pub fn into_parts(self) -> (Vec<RankedEntry>, Vec<usize>) {
        let ranks = self.ranks();
        (self.entries, ranks)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ratings: Vec<String> = self.entries.iter().map(|e| e.average.to_string()).collect();
        let brand_w = self
            .entries
            .iter()
            .map(|e| e.brand.chars().count())
            .chain([BRAND.len()])
            .max()
            .unwrap_or_default();
        let rating_w = ratings
            .iter()
            .map(String::len)
            .chain([RATING.len()])
            .max()
            .unwrap_or_default();
        let widths = [self.entries.len().to_string().len(), brand_w, rating_w];
        let [rank_w, ..] = widths;
        rule(f, widths, '-')?;
        writeln!(
            f,
            "| {:rank_w$} | {:<brand_w$} | {:<rating_w$} |",
            "", BRAND, RATING
        )?;
        rule(f, widths, '=')?;
        for (i, (entry, rating)) in self.entries.iter().zip(&ratings).enumerate() {
            writeln!(
                f,
                "| {:>rank_w$} | {:<brand_w$} | {rating:>rating_w$} |",
                i + 1,
                entry.brand
            )?;
            rule(f, widths, '-')?;
        }
        Ok(())
    }
}

fn rule(f: &mut fmt::Formatter<'_>, widths: [usize; 3], fill: char) -> fmt::Result {
    for width in widths {
        write!(f, "+{}", fill.to_string().repeat(width + 2))?;
    }
    writeln!(f, "+")
}
