//! Series analytics
//!
//! Pure functions over a chronological price/volume series. Every function is
//! total: too little data yields `None`, never an error.

use crate::models::PriceSeries;

/// Fewest points the spike-then-drop detector looks at
pub const SPIKE_MIN_POINTS: usize = 15;
/// Trailing window the spike-then-drop detector looks at
pub const SPIKE_WINDOW: usize = 30;
/// Default volume baseline length
pub const VOLUME_BASELINE_DAYS: usize = 30;
/// Default RSI period
pub const RSI_PERIOD: usize = 14;
/// Fewest points volatility needs
pub const VOLATILITY_MIN_POINTS: usize = 7;
/// Trailing window volatility is measured over
pub const VOLATILITY_WINDOW: usize = 30;

/// Rise and fall a spike-then-drop must show, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeDropRule {
    pub min_rise_pct: f64,
    pub min_drop_pct: f64,
}

impl Default for SpikeDropRule {
    fn default() -> Self {
        Self {
            min_rise_pct: 50.0,
            min_drop_pct: 40.0,
        }
    }
}

/// Percent change of the latest close against the close `lookback` points back
pub fn price_change_percent(series: &PriceSeries, lookback: usize) -> Option<f64> {
    let closes = series.closes();
    if lookback == 0 || closes.len() < lookback + 1 {
        return None;
    }
    let latest = closes[closes.len() - 1];
    let base = closes[closes.len() - 1 - lookback];
    if base <= 0.0 {
        return None;
    }
    Some((latest - base) / base * 100.0)
}

/// Mean volume of the last `recent` points over mean volume of the last `baseline` points
pub fn volume_ratio(series: &PriceSeries, recent: usize, baseline: usize) -> Option<f64> {
    let volumes = series.volumes();
    if recent == 0 || baseline == 0 || volumes.len() < baseline || recent > baseline {
        return None;
    }
    let baseline_mean = mean(&volumes[volumes.len() - baseline..]);
    if baseline_mean <= 0.0 {
        return None;
    }
    let recent_mean = mean(&volumes[volumes.len() - recent..]);
    Some(recent_mean / baseline_mean)
}

/// Mean volume over the last `days` points
pub fn average_volume(series: &PriceSeries, days: usize) -> Option<f64> {
    let volumes = series.volumes();
    if days == 0 || volumes.len() < days {
        return None;
    }
    Some(mean(&volumes[volumes.len() - days..]))
}

/// Pump-and-dump shape in the trailing window.
///
/// Fires when the window maximum is at least `min_rise_pct` above the window
/// start, the latest close is at least `min_drop_pct` below that maximum, and the
/// maximum is not one of the last two points. The earliest maximum wins ties.
pub fn detect_spike_then_drop(series: &PriceSeries, rule: SpikeDropRule) -> Option<bool> {
    let closes = series.closes();
    if closes.len() < SPIKE_MIN_POINTS {
        return None;
    }
    let window = &closes[closes.len().saturating_sub(SPIKE_WINDOW)..];

    let start = window[0];
    let latest = window[window.len() - 1];

    let mut peak_idx = 0;
    for (i, close) in window.iter().enumerate() {
        if *close > window[peak_idx] {
            peak_idx = i;
        }
    }
    let peak = window[peak_idx];

    if start <= 0.0 || peak <= 0.0 {
        return Some(false);
    }

    // peak at the very end means the drop has not started
    if peak_idx >= window.len() - 2 {
        return Some(false);
    }

    let rise_pct = (peak - start) / start * 100.0;
    let drop_pct = (peak - latest) / peak * 100.0;

    Some(rise_pct >= rule.min_rise_pct && drop_pct >= rule.min_drop_pct)
}

/// Relative strength index over the trailing `period` changes.
///
/// Mean gain over mean loss; 100 when there were no losses, 50 on a flat run.
pub fn relative_strength_index(series: &PriceSeries, period: usize) -> Option<f64> {
    let closes = series.closes();
    if period == 0 || closes.len() < period + 1 {
        return None;
    }
    let tail = &closes[closes.len() - period - 1..];

    let (gains, losses) = tail
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(g, l), change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(if avg_gain == 0.0 { 50.0 } else { 100.0 });
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Sample standard deviation of day-over-day returns, in percent
pub fn volatility(series: &PriceSeries) -> Option<f64> {
    let closes = series.closes();
    if closes.len() < VOLATILITY_MIN_POINTS {
        return None;
    }
    let window = &closes[closes.len().saturating_sub(VOLATILITY_WINDOW)..];

    let returns: Vec<f64> = window
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();
    if returns.len() < 2 {
        return None;
    }

    let avg = mean(&returns);
    let variance =
        returns.iter().map(|r| (r - avg).powi(2)).sum::<f64>() / (returns.len() - 1) as f64;
    Some(variance.sqrt() * 100.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}


#[cfg(test)]
mod tests {
    use super::test_support::{flat, series};
    use super::*;

    #[test]
    fn test_price_change_percent() {
        let s = series(&[10.0, 11.0, 12.0, 15.0], &[]);
        assert_eq!(price_change_percent(&s, 3), Some(50.0));
        assert_eq!(price_change_percent(&s, 4), None);
        assert_eq!(price_change_percent(&PriceSeries::empty(), 1), None);
    }

    #[test]
    fn test_volume_ratio_needs_baseline() {
        let s = flat(29, 1.0, 100.0);
        assert_eq!(volume_ratio(&s, 1, 30), None);

        let mut volumes = vec![100.0; 30];
        volumes[29] = 3_000.0;
        let s = series(&[1.0; 30], &volumes);
        let ratio = volume_ratio(&s, 1, 30).unwrap();
        // 3000 / ((29 * 100 + 3000) / 30)
        assert!((ratio - 3_000.0 / (5_900.0 / 30.0)).abs() < 1e-9);
    }

    #[test]
    fn test_volume_ratio_zero_baseline() {
        let s = flat(30, 1.0, 0.0);
        assert_eq!(volume_ratio(&s, 1, 30), None);
    }

    #[test]
    fn test_spike_then_drop_detected() {
        let mut closes = vec![2.0; 20];
        closes.extend([2.5, 3.0, 3.5, 4.0, 3.2, 2.6, 2.2]);
        let s = series(&closes, &[]);
        assert_eq!(detect_spike_then_drop(&s, SpikeDropRule::default()), Some(true));
    }

    #[test]
    fn test_pure_uptrend_is_not_spike_then_drop() {
        let closes: Vec<f64> = (0..20).map(|i| 1.0 + i as f64 * 0.2).collect();
        let s = series(&closes, &[]);
        assert_eq!(detect_spike_then_drop(&s, SpikeDropRule::default()), Some(false));
    }

    #[test]
    fn test_peak_in_last_two_points_is_ignored() {
        // big run-up with the maximum one point before the end
        let mut closes = vec![1.0; 15];
        closes.extend([3.0, 1.5]);
        let s = series(&closes, &[]);
        assert_eq!(detect_spike_then_drop(&s, SpikeDropRule::default()), Some(false));
    }

    #[test]
    fn test_spike_then_drop_short_series() {
        let s = flat(14, 1.0, 1.0);
        assert_eq!(detect_spike_then_drop(&s, SpikeDropRule::default()), None);
    }

    #[test]
    fn test_rsi_bounds() {
        let rising: Vec<f64> = (0..15).map(|i| i as f64 + 1.0).collect();
        assert_eq!(relative_strength_index(&series(&rising, &[]), 14), Some(100.0));
        assert_eq!(relative_strength_index(&flat(15, 3.0, 1.0), 14), Some(50.0));
        assert_eq!(relative_strength_index(&flat(14, 3.0, 1.0), 14), None);

        let falling: Vec<f64> = (0..15).map(|i| 20.0 - i as f64).collect();
        assert_eq!(relative_strength_index(&series(&falling, &[]), 14), Some(0.0));
    }

    #[test]
    fn test_rsi_mixed() {
        // 7 gains of 2 and 7 losses of 1 -> rs = 2 -> rsi = 66.67
        let mut closes = vec![10.0];
        for i in 0..14 {
            let last = closes[closes.len() - 1];
            closes.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let rsi = relative_strength_index(&series(&closes, &[]), 14).unwrap();
        assert!((rsi - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_volatility() {
        assert_eq!(volatility(&flat(6, 1.0, 1.0)), None);
        assert_eq!(volatility(&flat(10, 1.0, 1.0)), Some(0.0));

        let s = series(&[100.0, 110.0, 99.0, 108.9, 98.01, 107.811, 97.0299], &[]);
        let vol = volatility(&s).unwrap();
        // returns alternate +10% / -10%
        assert!(vol > 10.0 && vol < 11.5);
    }

    #[test]
    fn test_average_volume() {
        let s = flat(40, 1.0, 250.0);
        assert_eq!(average_volume(&s, 30), Some(250.0));
        assert_eq!(average_volume(&flat(10, 1.0, 250.0), 30), None);
    }
}
