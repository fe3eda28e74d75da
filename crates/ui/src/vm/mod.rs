mod page_vm;

pub use page_vm::{
    FeedbackVm, MfaOptionVm, MfaVm, PageBodyVm, PageVm, PasswordVm, PhishingVm, map_page,
};
