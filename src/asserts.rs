#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const CNFUZZ_ASSERT_LEVEL_DEFINITION: u8 = CNFUZZ_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const CNFUZZ_ASSERT_LEVEL_DEFINITION: u8 = CNFUZZ_ASSERT_EXTREME;

pub const CNFUZZ_ASSERT_SIMPLE: u8 = 1;
pub const CNFUZZ_ASSERT_MODERATE: u8 = 2;
pub const CNFUZZ_ASSERT_ADVANCED: u8 = 3;
pub const CNFUZZ_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! print_cnfuzz_assert_warning_message {
    () => {
        if $crate::asserts::CNFUZZ_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CNFUZZ_ASSERT_MODERATE {
            log::warn!("Potential performance degradation: the cnfuzz assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.", $crate::asserts::CNFUZZ_ASSERT_LEVEL_DEFINITION);
        };
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! cnfuzz_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::CNFUZZ_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CNFUZZ_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! cnfuzz_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::CNFUZZ_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CNFUZZ_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! cnfuzz_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::CNFUZZ_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CNFUZZ_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
