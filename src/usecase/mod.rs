pub mod catalog_usecase;
pub mod debounce;
pub mod finalize_registration_usecase;
pub mod link_service_usecase;
pub mod personal_step_usecase;
pub mod professional_step_usecase;
pub mod profile_step_usecase;
pub mod register_user_usecase;
pub mod session_usecase;
pub mod step_form;

#[cfg(test)]
pub mod mocks;
