use ss_core::{BorderMode, map_index};

/// 1D convolution with `f64` accumulation.
///
/// Every output is `sum(w * s) / sum(w)` over the taps whose sample exists
/// under `border`. With [`BorderMode::Renormalize`] the taps beyond the signal
/// are dropped, so a constant signal is reproduced exactly near the ends.
/// Taps are always visited in kernel order, which keeps results independent
/// of the code path that produced them.
pub fn convolve_f64<T: Copy + Into<f64>>(
    signal: &[T],
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
    out: &mut [f64],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    let kernel_sum: f64 = kernel.iter().sum();
    let interior_start = radius.min(n);
    let interior_end = n.saturating_sub(radius).max(interior_start);

    // Left border.
    for (i, out_i) in out.iter_mut().enumerate().take(interior_start) {
        *out_i = convolve_at(signal, kernel, radius, border, i);
    }

    // Interior: full kernel footprint in bounds.
    for (i, out_i) in out
        .iter_mut()
        .enumerate()
        .take(interior_end)
        .skip(interior_start)
    {
        let mut acc = 0.0f64;
        for (k, &kv) in kernel.iter().enumerate() {
            acc += signal[i + radius - k].into() * kv;
        }
        *out_i = acc / kernel_sum;
    }

    // Right border.
    for (i, out_i) in out.iter_mut().enumerate().skip(interior_end) {
        *out_i = convolve_at(signal, kernel, radius, border, i);
    }
}

fn convolve_at<T: Copy + Into<f64>>(
    signal: &[T],
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
    i: usize,
) -> f64 {
    let mut acc = 0.0f64;
    let mut weight = 0.0f64;
    for_each_tap(i, signal.len(), kernel, radius, border, |idx, kv| {
        acc += signal[idx].into() * kv;
        weight += kv;
    });
    acc / weight
}

/// Calls `f(sample_index, weight)` for each tap of output `i` whose sample
/// exists, in kernel order.
#[inline]
pub fn for_each_tap(
    i: usize,
    n: usize,
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
    mut f: impl FnMut(usize, f64),
) {
    for (k, &kv) in kernel.iter().enumerate() {
        let pos = i as isize + radius as isize - k as isize;
        if let Some(idx) = map_index(pos, n, border) {
            f(idx, kv);
        }
    }
}

/// Taps of output `i` and the sum of their weights.
///
/// Used when the same taps are applied to a whole row of samples at once,
/// e.g. the vertical pass of a separable filter.
pub fn taps(
    i: usize,
    n: usize,
    kernel: &[f64],
    radius: usize,
    border: BorderMode,
) -> (Vec<(usize, f64)>, f64) {
    let mut out = Vec::with_capacity(kernel.len());
    let mut weight = 0.0f64;
    for_each_tap(i, n, kernel, radius, border, |idx, kv| {
        out.push((idx, kv));
        weight += kv;
    });
    (out, weight)
}
