use crate::{ConfigError, ResolvePolicy, Result};

/// Extra items rendered beyond each edge of the visible range when unspecified.
pub const DEFAULT_BUFFER_COUNT: usize = 5;

/// Default delay before `is_scrolling` resets after the last scroll event.
pub const DEFAULT_IS_SCROLLING_RESET_DELAY_MS: u64 = 150;

/// Configuration for a virtual list.
///
/// Construct with [`ListOptions::new`] and adjust with the `with_*` builders. Invalid
/// combinations are reported by [`ListOptions::validate`], which every constructor that accepts
/// options calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListOptions {
    /// Fixed viewport height.
    pub container_height: u32,
    /// Per-item height used until an item is measured.
    pub estimated_item_height: u32,
    /// Items rendered beyond each edge of the visible range.
    pub buffer_count: usize,
    /// Reveal an unmeasured cell at its estimated height after this long.
    ///
    /// `None` keeps unmeasured cells hidden until a measurement arrives.
    pub reveal_after_ms: Option<u64>,
    pub is_scrolling_reset_delay_ms: u64,
    pub resolve_policy: ResolvePolicy,
    pub initial_scroll_top: u64,
}

impl ListOptions {
    pub fn new(container_height: u32, estimated_item_height: u32) -> Self {
        Self {
            container_height,
            estimated_item_height,
            buffer_count: DEFAULT_BUFFER_COUNT,
            reveal_after_ms: None,
            is_scrolling_reset_delay_ms: DEFAULT_IS_SCROLLING_RESET_DELAY_MS,
            resolve_policy: ResolvePolicy::default(),
            initial_scroll_top: 0,
        }
    }

    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn with_reveal_after_ms(mut self, reveal_after_ms: Option<u64>) -> Self {
        self.reveal_after_ms = reveal_after_ms;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_resolve_policy(mut self, resolve_policy: ResolvePolicy) -> Self {
        self.resolve_policy = resolve_policy;
        self
    }

    pub fn with_initial_scroll_top(mut self, scroll_top: u64) -> Self {
        self.initial_scroll_top = scroll_top;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.container_height == 0 {
            return Err(ConfigError::NonPositiveContainerHeight(0));
        }
        if self.estimated_item_height == 0 {
            return Err(ConfigError::NonPositiveEstimatedItemHeight(0));
        }
        Ok(())
    }
}

/// Unvalidated list configuration, as it arrives from a host or a config file.
///
/// Numeric fields are signed so that out-of-range input can be rejected with a descriptive
/// [`ConfigError`] instead of failing to parse. Convert with `ListOptions::try_from`.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` using camelCase
/// field names (`containerHeight`, `estimatedItemHeight`, `bufferCount`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", deny_unknown_fields))]
pub struct RawListConfig {
    pub container_height: i64,
    pub estimated_item_height: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buffer_count: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reveal_after_ms: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_scrolling_reset_delay_ms: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resolve_policy: Option<ResolvePolicy>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_scroll_top: Option<u64>,
}

impl TryFrom<RawListConfig> for ListOptions {
    type Error = ConfigError;

    fn try_from(raw: RawListConfig) -> Result<Self> {
        if raw.container_height <= 0 {
            return Err(ConfigError::NonPositiveContainerHeight(raw.container_height));
        }
        if raw.estimated_item_height <= 0 {
            return Err(ConfigError::NonPositiveEstimatedItemHeight(
                raw.estimated_item_height,
            ));
        }
        let container_height = to_u32("containerHeight", raw.container_height)?;
        let estimated_item_height = to_u32("estimatedItemHeight", raw.estimated_item_height)?;

        let buffer_count = match raw.buffer_count {
            None => DEFAULT_BUFFER_COUNT,
            Some(n) if n < 0 => return Err(ConfigError::NegativeBufferCount(n)),
            Some(n) => usize::try_from(n).map_err(|_| ConfigError::OutOfRange {
                field: "bufferCount",
                value: n,
            })?,
        };

        let options = ListOptions {
            container_height,
            estimated_item_height,
            buffer_count,
            reveal_after_ms: raw.reveal_after_ms,
            is_scrolling_reset_delay_ms: raw
                .is_scrolling_reset_delay_ms
                .unwrap_or(DEFAULT_IS_SCROLLING_RESET_DELAY_MS),
            resolve_policy: raw.resolve_policy.unwrap_or_default(),
            initial_scroll_top: raw.initial_scroll_top.unwrap_or(0),
        };
        options.validate()?;
        Ok(options)
    }
}

fn to_u32(field: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ConfigError::OutOfRange { field, value })
}
