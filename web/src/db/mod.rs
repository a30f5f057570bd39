pub mod entities;

#[cfg(feature = "ssr")]
pub mod appointment_repository;
#[cfg(feature = "ssr")]
pub mod pool;
#[cfg(feature = "ssr")]
pub mod professional_repository;
#[cfg(feature = "ssr")]
pub mod seed;
#[cfg(feature = "ssr")]
pub mod user_repository;

/// Minutes as stored in an `INTEGER` column.
#[cfg(feature = "ssr")]
pub(crate) fn minutes_column(minutes: u32) -> crate::error::AppResult<i32> {
    i32::try_from(minutes).map_err(|_| {
        crate::error::AppError::Validation(format!("duration of {} minutes is too long", minutes))
    })
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn minutes_outside_the_column_range_are_rejected() {
        assert_eq!(minutes_column(480).unwrap(), 480);
        assert_eq!(minutes_column(i32::MAX as u32).unwrap(), i32::MAX);
        assert!(matches!(
            minutes_column(i32::MAX as u32 + 1),
            Err(AppError::Validation(_))
        ));
    }
}
