pub mod rest_countries;
pub mod source;
pub mod types;

pub use rest_countries::RestCountriesClient;
pub use source::{CountrySource, SourceError};
pub use types::{Country, CountryName, Currency, Flags, Maps};
