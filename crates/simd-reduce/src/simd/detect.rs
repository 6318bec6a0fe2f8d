//! Runtime CPU feature detection.

use std::fmt;

use once_cell::sync::OnceCell;

use crate::types::{Numeric, ScalarKind};

/// Environment variable that, when set to a truthy value, disables the
/// vector path for the whole process.
pub const FORCE_SCALAR_ENV: &str = "SIMD_REDUCE_FORCE_SCALAR";

/// Process-wide snapshot, built on first access.
static CAPABILITIES: OnceCell<Capabilities> = OnceCell::new();

/// Instruction set the kernels dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimdLevel {
    /// No usable vector unit; every reduction runs the scalar loop.
    Scalar,
    /// 256-bit AVX2 (x86_64).
    Avx2,
    /// 128-bit NEON (aarch64).
    Neon,
}

impl SimdLevel {
    /// Width of one vector register in bytes.
    pub const fn register_bytes(self) -> usize {
        match self {
            Self::Scalar => 0,
            Self::Avx2 => 32,
            Self::Neon => 16,
        }
    }

    /// Number of `kind` elements held by one register. `1` for [`SimdLevel::Scalar`].
    pub const fn lanes(self, kind: ScalarKind) -> usize {
        match self {
            Self::Scalar => 1,
            _ => self.register_bytes() / kind.size_bytes(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
        }
    }
}

/// Immutable record of what the host CPU supports.
///
/// The instruction-set flags are informational; dispatch only looks at
/// [`Capabilities::level`] and [`Capabilities::hardware_acceleration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub level: SimdLevel,
    pub hardware_acceleration: bool,
    pub sse2: bool,
    pub sse4_1: bool,
    pub avx: bool,
    pub avx2: bool,
    pub fma: bool,
    pub avx512f: bool,
    pub neon: bool,
}

impl Capabilities {
    /// A snapshot with every flag cleared and one lane per kind.
    pub const fn scalar() -> Self {
        Self {
            level: SimdLevel::Scalar,
            hardware_acceleration: false,
            sse2: false,
            sse4_1: false,
            avx: false,
            avx2: false,
            fma: false,
            avx512f: false,
            neon: false,
        }
    }

    /// Probe the CPU. Prefer [`capabilities`], which caches the result.
    pub fn detect() -> Self {
        let mut caps = Self::probe();

        if force_scalar_requested() {
            tracing::debug!(
                env = FORCE_SCALAR_ENV,
                detected = caps.level.name(),
                "vector path disabled by environment"
            );
            caps.level = SimdLevel::Scalar;
            caps.hardware_acceleration = false;
        }

        tracing::info!(
            simd_level = caps.level.name(),
            hardware_acceleration = caps.hardware_acceleration,
            avx2 = caps.avx2,
            avx512f = caps.avx512f,
            neon = caps.neon,
            lanes_f32 = caps.lanes(ScalarKind::F32),
            lanes_f64 = caps.lanes(ScalarKind::F64),
            "SIMD capabilities detected"
        );

        caps
    }

    #[cfg(target_arch = "x86_64")]
    fn probe() -> Self {
        let avx2 = is_x86_feature_detected!("avx2");
        Self {
            level: if avx2 {
                SimdLevel::Avx2
            } else {
                SimdLevel::Scalar
            },
            hardware_acceleration: avx2,
            sse2: is_x86_feature_detected!("sse2"),
            sse4_1: is_x86_feature_detected!("sse4.1"),
            avx: is_x86_feature_detected!("avx"),
            avx2,
            fma: is_x86_feature_detected!("fma"),
            avx512f: is_x86_feature_detected!("avx512f"),
            neon: false,
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn probe() -> Self {
        let neon = std::arch::is_aarch64_feature_detected!("neon");
        Self {
            level: if neon {
                SimdLevel::Neon
            } else {
                SimdLevel::Scalar
            },
            hardware_acceleration: neon,
            neon,
            ..Self::scalar()
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn probe() -> Self {
        Self::scalar()
    }

    /// Preferred lane count for `kind`.
    pub const fn lanes(&self, kind: ScalarKind) -> usize {
        if self.hardware_acceleration {
            self.level.lanes(kind)
        } else {
            1
        }
    }

    /// Width in bytes of the registers dispatch uses; `0` when not accelerated.
    pub const fn register_bytes(&self) -> usize {
        if self.hardware_acceleration {
            self.level.register_bytes()
        } else {
            0
        }
    }

    /// Preferred lane count for `T`.
    pub fn lanes_for<T: Numeric>(&self) -> usize {
        self.lanes(T::KIND)
    }

    /// Lane counts for every supported kind.
    pub fn lane_table(&self) -> [(ScalarKind, usize); 4] {
        ScalarKind::ALL.map(|kind| (kind, self.lanes(kind)))
    }

    /// Whether a `len`-element buffer of `T` takes the vector path.
    pub fn would_vectorize<T: Numeric>(&self, len: usize) -> bool {
        super::should_vectorize(len, self.lanes_for::<T>(), self.hardware_acceleration)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::scalar()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "simd={} accelerated={}",
            self.level.name(),
            self.hardware_acceleration
        )?;
        for (kind, lanes) in self.lane_table() {
            write!(f, " {}x{}", kind, lanes)?;
        }
        let flags = [
            ("sse2", self.sse2),
            ("sse4.1", self.sse4_1),
            ("avx", self.avx),
            ("avx2", self.avx2),
            ("fma", self.fma),
            ("avx512f", self.avx512f),
            ("neon", self.neon),
        ];
        for (name, _) in flags.iter().filter(|(_, on)| *on) {
            write!(f, " +{}", name)?;
        }
        Ok(())
    }
}

fn force_scalar_requested() -> bool {
    std::env::var(FORCE_SCALAR_ENV)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Returns the cached capability snapshot, detecting it on first call.
///
/// Concurrent first calls are safe: exactly one thread runs detection and the
/// others block until the snapshot is published.
#[inline]
pub fn capabilities() -> Capabilities {
    *CAPABILITIES.get_or_init(Capabilities::detect)
}

/// Returns the cached dispatch level.
#[inline]
pub fn simd_level() -> SimdLevel {
    capabilities().level
}

/// Forces capability detection so the first reduction does not pay for it.
pub fn warmup() {
    let _ = capabilities();
}
