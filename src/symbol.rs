//! # Pair Symbol Normalization
//!
//! Indodax pairs appear in the wild as `BTCIDR`, `btcidr` or `btc_idr`. Cache
//! keys and upstream calls always use the canonical `<base>_idr` form.

/// Canonicalize a caller-supplied trading pair.
///
/// Lowercases the input; if it contains `idr` without an underscore, the first
/// `idr` occurrence is stripped and reattached as the quote segment. Anything
/// else (already underscored, or non-IDR pairs) passes through lowercased.
/// Pure and infallible; parameter validation is the handlers' job.
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("idr") && !lower.contains('_') {
        let base = lower.replacen("idr", "", 1);
        format!("{}_idr", base)
    } else {
        lower
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_pair_is_split() {
        assert_eq!(normalize("BTCIDR"), "btc_idr");
    }

    #[test]
    fn already_underscored_passes_through() {
        assert_eq!(normalize("btc_idr"), "btc_idr");
        assert_eq!(normalize("BTC_IDR"), "btc_idr");
    }

    #[test]
    fn lowercase_pair_is_split() {
        assert_eq!(normalize("ethidr"), "eth_idr");
    }

    #[test]
    fn non_idr_pair_is_only_lowercased() {
        assert_eq!(normalize("ETHBTC"), "ethbtc");
    }
}
