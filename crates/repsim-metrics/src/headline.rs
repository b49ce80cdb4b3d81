//! Marketing headline templates.

/// Builds the headline for a business.
///
/// A case-insensitive substring test on the name picks a themed template,
/// first match wins: cafe/coffee, then tech/solutions, then restaurant.
/// Anything else gets the default template.
#[must_use]
pub fn headline_for(name: &str, location: &str) -> String {
    let lower = name.to_lowercase();
    if lower.contains("cafe") || lower.contains("coffee") {
        format!("Your Cozy {name}: Best Coffee in {location}")
    } else if lower.contains("tech") || lower.contains("solutions") {
        format!("Cutting-Edge {name} for {location}'s Digital Needs")
    } else if lower.contains("restaurant") {
        format!("Experience Culinary Delights at {name} in {location}")
    } else {
        format!("Revolutionize Your {location} Presence with {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cafe_name_gets_coffee_template() {
        let headline = headline_for("Joe's Cafe", "Austin");
        assert!(headline.contains("Cozy Joe's Cafe"), "got: {headline}");
        assert!(headline.contains("Austin"), "got: {headline}");
    }

    #[test]
    fn coffee_name_gets_coffee_template() {
        let headline = headline_for("Bean Coffee Roasters", "Portland");
        assert!(headline.starts_with("Your Cozy"), "got: {headline}");
    }

    #[test]
    fn tech_name_gets_technology_template() {
        let headline = headline_for("Acme Tech Solutions", "Denver");
        assert_eq!(
            headline,
            "Cutting-Edge Acme Tech Solutions for Denver's Digital Needs"
        );
    }

    #[test]
    fn solutions_alone_gets_technology_template() {
        let headline = headline_for("Apex Solutions", "Boston");
        assert!(headline.starts_with("Cutting-Edge"), "got: {headline}");
    }

    #[test]
    fn restaurant_name_gets_dining_template() {
        let headline = headline_for("Luigi's Restaurant", "Chicago");
        assert_eq!(
            headline,
            "Experience Culinary Delights at Luigi's Restaurant in Chicago"
        );
    }

    #[test]
    fn plain_name_gets_default_template() {
        let headline = headline_for("Orbit Fitness", "Seattle");
        assert_eq!(
            headline,
            "Revolutionize Your Seattle Presence with Orbit Fitness"
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let headline = headline_for("CAFE LUNA", "Miami");
        assert!(headline.starts_with("Your Cozy"), "got: {headline}");
    }

    #[test]
    fn coffee_template_wins_over_tech_when_both_match() {
        let headline = headline_for("Cafe Tech Hub", "Oakland");
        assert!(headline.starts_with("Your Cozy"), "got: {headline}");
    }
}
