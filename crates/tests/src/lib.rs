#[cfg(test)]
mod common;

#[cfg(test)]
mod navigator_flow_tests;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod list_tests;

#[cfg(test)]
mod attendance_tests;

#[cfg(test)]
mod grading_tests;

#[cfg(test)]
mod organization_tests;

#[cfg(test)]
mod error_mapping_tests;
