use chrono::NaiveDate;

use super::types::{AssetClass, AssetReference};

// Inception prices are split-adjusted; `price_5y_ago` is the close nearest to
// October 2021.
const fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(date) => date,
        None => panic!("invalid reference date"),
    }
}

macro_rules! asset {
    ($ticker:literal, $name:literal, $class:ident, $sector:literal, ($y:literal, $m:literal, $d:literal), $ipo:literal, $five:literal) => {
        asset!($ticker, $name, $class, $sector, ($y, $m, $d), $ipo, $five, false)
    };
    ($ticker:literal, $name:literal, $class:ident, $sector:literal, ($y:literal, $m:literal, $d:literal), $ipo:literal, $five:literal, $benchmark:literal) => {
        AssetReference {
            ticker: $ticker,
            name: $name,
            class: AssetClass::$class,
            sector: $sector,
            inception_date: date($y, $m, $d),
            inception_price: $ipo,
            price_5y_ago: $five,
            benchmark: $benchmark,
        }
    };
}

pub const ASSETS: &[AssetReference] = &[
    asset!("AAPL", "Apple", Company, "Technology", (1980, 12, 12), 0.10, 149.80),
    asset!("MSFT", "Microsoft", Company, "Technology", (1986, 3, 13), 0.097, 309.16),
    asset!("NVDA", "NVIDIA", Company, "Semiconductors", (1999, 1, 22), 0.041, 25.52),
    asset!("AMZN", "Amazon", Company, "Consumer Discretionary", (1997, 5, 15), 0.098, 168.62),
    asset!("GOOGL", "Alphabet", Company, "Communication Services", (2004, 8, 19), 2.51, 148.05),
    asset!("META", "Meta Platforms", Company, "Communication Services", (2012, 5, 18), 38.23, 324.61),
    asset!("TSLA", "Tesla", Company, "Consumer Discretionary", (2010, 6, 29), 1.59, 1114.00),
    asset!("AVGO", "Broadcom", Company, "Semiconductors", (2009, 8, 6), 1.53, 50.05),
    asset!("TSM", "Taiwan Semiconductor", Company, "Semiconductors", (1997, 10, 9), 4.17, 118.05),
    asset!("AMD", "Advanced Micro Devices", Company, "Semiconductors", (1979, 9, 27), 3.15, 120.23),
    asset!("ASML", "ASML Holding", Company, "Semiconductors", (1995, 3, 15), 0.94, 810.44),
    asset!("ORCL", "Oracle", Company, "Technology", (1986, 3, 12), 0.05, 95.58),
    asset!("CRM", "Salesforce", Company, "Technology", (2004, 6, 23), 4.28, 299.69),
    asset!("ADBE", "Adobe", Company, "Technology", (1986, 8, 13), 0.18, 651.01),
    asset!("NFLX", "Netflix", Company, "Communication Services", (2002, 5, 23), 1.10, 690.31),
    asset!("BRK.B", "Berkshire Hathaway", Company, "Financials", (1996, 5, 9), 22.60, 287.04),
    asset!("JPM", "JPMorgan Chase", Company, "Financials", (1980, 3, 17), 3.47, 169.96),
    asset!("V", "Visa", Company, "Financials", (2008, 3, 19), 14.12, 222.75),
    asset!("MA", "Mastercard", Company, "Financials", (2006, 5, 25), 4.65, 349.14),
    asset!("GS", "Goldman Sachs", Company, "Financials", (1999, 5, 4), 53.00, 413.04),
    asset!("UNH", "UnitedHealth Group", Company, "Health Care", (1984, 10, 17), 0.11, 460.46),
    asset!("LLY", "Eli Lilly", Company, "Health Care", (1970, 1, 2), 0.68, 257.69),
    asset!("JNJ", "Johnson & Johnson", Company, "Health Care", (1944, 9, 25), 0.04, 162.43),
    asset!("NVO", "Novo Nordisk", Company, "Health Care", (1981, 5, 1), 0.08, 55.90),
    asset!("ISRG", "Intuitive Surgical", Company, "Health Care", (2000, 6, 13), 1.02, 110.75),
    asset!("COST", "Costco", Company, "Consumer Staples", (1985, 12, 5), 3.35, 491.28),
    asset!("WMT", "Walmart", Company, "Consumer Staples", (1972, 8, 25), 0.017, 49.46),
    asset!("PG", "Procter & Gamble", Company, "Consumer Staples", (1962, 1, 2), 0.11, 143.10),
    asset!("KO", "Coca-Cola", Company, "Consumer Staples", (1962, 1, 2), 0.25, 55.79),
    asset!("PEP", "PepsiCo", Company, "Consumer Staples", (1972, 6, 1), 0.89, 161.60),
    asset!("MCD", "McDonald's", Company, "Consumer Discretionary", (1966, 4, 21), 0.03, 245.54),
    asset!("NKE", "Nike", Company, "Consumer Discretionary", (1980, 12, 2), 0.18, 166.05),
    asset!("HD", "Home Depot", Company, "Consumer Discretionary", (1981, 9, 22), 0.04, 371.73),
    asset!("DIS", "Walt Disney", Company, "Communication Services", (1957, 11, 12), 0.05, 169.33),
    asset!("XOM", "Exxon Mobil", Company, "Energy", (1970, 1, 2), 1.69, 63.77),
    asset!("CVX", "Chevron", Company, "Energy", (1970, 1, 2), 2.10, 113.86),
    asset!("NEE", "NextEra Energy", Company, "Utilities", (1984, 1, 3), 0.98, 85.13),
    asset!("CAT", "Caterpillar", Company, "Industrials", (1970, 1, 2), 0.68, 204.48),
    asset!("GE", "GE Aerospace", Company, "Industrials", (1962, 1, 2), 0.56, 103.07),
    asset!("LMT", "Lockheed Martin", Company, "Industrials", (1995, 3, 16), 17.00, 345.54),
    asset!("PLTR", "Palantir", Company, "Technology", (2020, 9, 30), 9.50, 25.95),
    asset!("SHOP", "Shopify", Company, "Technology", (2015, 5, 21), 2.83, 145.75),
    asset!("GLD", "Gold", Commodity, "Precious Metals", (2004, 11, 18), 44.38, 167.40),
    asset!("SLV", "Silver", Commodity, "Precious Metals", (2006, 4, 28), 13.86, 22.35),
    asset!("USO", "Crude Oil", Commodity, "Energy", (2006, 4, 10), 548.96, 57.40),
    asset!("CPER", "Copper", Commodity, "Industrial Metals", (2011, 11, 15), 25.86, 27.44),
    asset!("BTC", "Bitcoin", Crypto, "Digital Assets", (2010, 7, 17), 0.0495, 61_553.00),
    asset!("ETH", "Ethereum", Crypto, "Digital Assets", (2015, 8, 7), 2.83, 3_846.00),
    asset!("SOL", "Solana", Crypto, "Digital Assets", (2020, 4, 10), 0.95, 198.35),
    asset!("QQQ", "Nasdaq-100 Index", Index, "Broad Market", (1999, 3, 10), 49.31, 382.86),
    asset!("SPY", "S&P 500 Index", Index, "Broad Market", (1993, 1, 29), 43.94, 453.12, true),
];

pub fn find_asset(ticker: &str) -> Option<&'static AssetReference> {
    ASSETS
        .iter()
        .find(|asset| asset.ticker.eq_ignore_ascii_case(ticker))
}

pub fn benchmark() -> Option<&'static AssetReference> {
    ASSETS.iter().find(|asset| asset.benchmark)
}
