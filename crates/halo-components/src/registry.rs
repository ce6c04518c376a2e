//! Registration
//!
//! Components are registered explicitly, once, on the document that
//! hosts them. Registering a tag twice is an error.

use std::rc::Rc;

use halo_dom::{Constructor, CustomElement, CustomElementDefinition, Document, DomError, NodeId};

use crate::element::HaloElement;
use crate::form::{self, FormConfig, FormController};
use crate::{ComponentDescriptor, ComponentError, standard_descriptors};

fn construction_error(tag: &str, err: ComponentError) -> DomError {
    DomError::Construction {
        name: tag.to_string(),
        source: Box::new(err),
    }
}

/// Register one descriptor-built component
pub fn define(doc: &mut Document, descriptor: ComponentDescriptor) -> Result<(), DomError> {
    let observed = descriptor.config.observed_attributes();
    let tag = descriptor.tag.clone();
    let form_associated = descriptor.form_associated;
    let descriptor = Rc::new(descriptor);

    let constructor: Constructor = Rc::new(move |doc: &mut Document, host: NodeId| {
        let element = HaloElement::new(doc, host, &descriptor).map_err(|e| construction_error(&descriptor.tag, e))?;
        Ok(Rc::new(element) as Rc<dyn CustomElement>)
    });
    doc.define(
        CustomElementDefinition::new(tag, constructor)
            .with_observed_attributes(observed)
            .with_form_associated(form_associated),
    )
}

/// Register the form wrapper under `halo-form`
pub fn define_form(doc: &mut Document, config: FormConfig) -> Result<(), DomError> {
    let component_config = Rc::new(form::component_config());
    let observed = component_config.observed_attributes();
    let config = Rc::new(config);

    let constructor: Constructor = Rc::new(move |doc: &mut Document, host: NodeId| {
        let controller = FormController::new(doc, host, Rc::clone(&component_config), Rc::clone(&config))
            .map_err(|e| construction_error(form::TAG, e))?;
        Ok(Rc::new(controller) as Rc<dyn CustomElement>)
    });
    doc.define(CustomElementDefinition::new(form::TAG, constructor).with_observed_attributes(observed))
}

/// Register every shipped component; call once at startup
pub fn define_standard_components(doc: &mut Document) -> Result<(), DomError> {
    for descriptor in standard_descriptors() {
        define(doc, descriptor)?;
    }
    define_form(doc, FormConfig::default())?;
    tracing::debug!("Registered standard Halo components");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_for;

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut doc = Document::default();
        define_standard_components(&mut doc).unwrap();
        assert!(doc.is_defined("halo-input"));
        assert!(doc.is_defined("halo-form"));
        assert!(matches!(
            define_standard_components(&mut doc),
            Err(DomError::AlreadyDefined(name)) if name == "halo-button"
        ));
    }

    #[test]
    fn test_form_association() {
        let mut doc = Document::default();
        define_standard_components(&mut doc).unwrap();
        let input = doc.create_element("halo-input").unwrap();
        let fieldset = doc.create_element("halo-fieldset").unwrap();
        assert!(doc.is_form_associated(input));
        assert!(!doc.is_form_associated(fieldset));
        assert_eq!(component_for(&doc, input).unwrap().name(), "HaloInput");
    }

    #[test]
    fn test_construction_error_surfaces_from_create_element() {
        let mut doc = Document::default();
        let mut descriptor = crate::fields::button();
        descriptor.tag = "broken-button".into();
        descriptor.config = Rc::new(crate::ComponentConfig::new("<span></span>", "button"));
        define(&mut doc, descriptor).unwrap();

        let err = doc.create_element("broken-button").unwrap_err();
        assert!(matches!(err, DomError::Construction { ref name, .. } if name == "broken-button"));
    }
}
