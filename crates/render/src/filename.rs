//! Download file naming

use cv_data::text::underscore_whitespace;
use cv_data::{CvData, ProfileKey};

/// File name for a downloaded CV: `<Name_with_underscores>_CV_<profile>.pdf`
pub fn pdf_filename(cv: &CvData, key: ProfileKey) -> String {
    format!(
        "{}_CV_{}.pdf",
        underscore_whitespace(&cv.personal_info.name),
        key.as_str()
    )
}
