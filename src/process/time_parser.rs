/// Parse `"HH:MM:SS"` into total minutes (`H*60 + M + S/60`).
///
/// Blank input, anything other than three `:`-separated parts, or a
/// non-integer part gives `None`, as does an hour field too large to
/// convert.
pub fn time_to_minutes(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let mut parts = s.split(':');
    let (h, m, sec) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let h: i64 = h.parse().ok()?;
    let m: i64 = m.parse().ok()?;
    let sec: i64 = sec.parse().ok()?;
    let whole = h.checked_mul(60)?.checked_add(m)?;
    Some(whole as f64 + sec as f64 / 60.0)
}
