//! Search command implementation.

use realty_core::{Estate, PagedResult, PropertyFilter, PropertySummary, SortDirection};
use rust_decimal::Decimal;

/// Command-line search criteria.
#[derive(Debug, Default)]
pub struct SearchArgs {
    /// Free-text term.
    pub text: Option<String>,
    /// City substring.
    pub city: Option<String>,
    /// Minimum price.
    pub min_price: Option<Decimal>,
    /// Maximum price.
    pub max_price: Option<Decimal>,
    /// Sort key name.
    pub sort: String,
    /// Ascending order.
    pub ascending: bool,
    /// Page number.
    pub page: u32,
    /// Page size.
    pub size: u32,
}

impl SearchArgs {
    /// Builds the property filter.
    pub fn filter(&self) -> PropertyFilter {
        let direction = if self.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        let mut filter = PropertyFilter::new()
            .page(self.page, self.size)
            .price_between(self.min_price, self.max_price)
            .sort_by_name(&self.sort, direction);
        filter.search_term = self.text.clone();
        filter.city = self.city.clone();
        filter
    }
}

/// Runs the search command.
pub fn run(estate: &Estate, args: &SearchArgs, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let response = estate.api().search_properties(args.filter());
    let page = response.data.ok_or(response.message)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&page)?),
        _ => print_text_output(&page),
    }
    Ok(())
}

fn print_text_output(page: &PagedResult<PropertySummary>) {
    println!(
        "Page {}/{} ({} matches)",
        page.page_number,
        page.total_pages(),
        page.total_count
    );
    for row in &page.items {
        let property = &row.property;
        println!(
            "  {:<10} {:<28} {:>16}  {}",
            property.code_internal,
            property.name,
            row.formatted_price,
            property.city.as_deref().unwrap_or("-"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_core::SortKey;

    #[test]
    fn unknown_sort_falls_back_to_newest_first() {
        let args = SearchArgs {
            sort: "colour".into(),
            ascending: true,
            page: 1,
            size: 10,
            ..SearchArgs::default()
        };
        let filter = args.filter();
        assert_eq!(filter.sort_by, SortKey::CreatedAt);
        assert_eq!(filter.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn criteria_are_copied() {
        let args = SearchArgs {
            text: Some("loft".into()),
            city: Some("Austin".into()),
            min_price: Some(Decimal::new(100, 0)),
            sort: "price".into(),
            page: 2,
            size: 5,
            ..SearchArgs::default()
        };
        let filter = args.filter();
        assert_eq!(filter.search_term.as_deref(), Some("loft"));
        assert_eq!(filter.city.as_deref(), Some("Austin"));
        assert_eq!(filter.sort_by, SortKey::Price);
        assert_eq!(filter.page_number, 2);
    }
}
