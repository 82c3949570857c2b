use serde::{Deserialize, Serialize};

/// How a 1D filter treats samples that fall outside the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Out-of-range samples are absent; the filter divides by the sum of the
    /// weights that landed inside.
    #[default]
    Renormalize,
    Clamp,
    Reflect101,
}

/// Maps a possibly out-of-range sample index into `0..len`.
///
/// Returns `None` when the sample does not exist, which is always the case
/// for an out-of-range index under [`BorderMode::Renormalize`].
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Renormalize => None,
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                Some(len - 1)
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some((2 * len - 2) - r)
            }
        }
    }
}
