//! Policy recommendation texts for the leading categories.

use callcenter_incident_models::BigCategory;

/// Text used for categories without a dedicated recommendation.
pub const DEFAULT_RECOMMENDATION: &str = "Periodic evaluation and monitoring required";

/// Returns the recommended policy action for a category.
#[must_use]
pub const fn recommendation_for(category: BigCategory) -> &'static str {
    match category {
        BigCategory::TrafficIncident => {
            "Strengthen coordination with the transportation agency on traffic management and traffic light repairs"
        }
        BigCategory::Infrastructure => {
            "Allocate priority budget to repairing roads, street lighting and basic infrastructure"
        }
        BigCategory::Health => {
            "Strengthen coordination with the health agency and hospitals for medical emergency response"
        }
        BigCategory::Security => {
            "Increase patrols and coordination with the police to anticipate crime"
        }
        BigCategory::Fire => {
            "Evaluate response times and fire fleet needs in fire-prone zones"
        }
        BigCategory::PublicService => {
            "Optimize public information systems and administrative services"
        }
        BigCategory::Prank => {
            "Enforce firm sanctions and educate the public about the harm of prank calls"
        }
        BigCategory::Ghost => {
            "Evaluate the call center's technical systems to reduce ghost calls"
        }
        BigCategory::Information => {
            "Strengthen the call center's role as the public information hub"
        }
        BigCategory::Other => DEFAULT_RECOMMENDATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_other_falls_back() {
        for category in BigCategory::all() {
            let text = recommendation_for(*category);
            assert!(!text.is_empty());
            assert_eq!(
                text == DEFAULT_RECOMMENDATION,
                *category == BigCategory::Other
            );
        }
    }
}
