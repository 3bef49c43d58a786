use std::fmt::{self, Debug};
use std::path::PathBuf;
use std::ptr;

use core_foundation::base::{CFType, CFTypeRef, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use core_foundation::url::CFURL;
use core_text::font_collection::{self, CTFontCollection};
use core_text::font_descriptor::{
    CTFontDescriptor, CTFontDescriptorCopyAttribute, CTFontDescriptorRef,
    kCTFontFamilyNameAttribute, kCTFontNameAttribute, kCTFontStyleNameAttribute,
    kCTFontSymbolicTrait, kCTFontTraitsAttribute, kCTFontURLAttribute, kCTFontWeightTrait,
};

use crate::font::SymbolicTraits;
use crate::generic_backend::{GenericFontCollectionBackend, GenericFontDescriptionBackend};

#[link(name = "CoreText", kind = "framework")]
extern "C" {
    // The language is returned under the create rule, like the value.
    fn CTFontDescriptorCopyLocalizedAttribute(
        descriptor: CTFontDescriptorRef,
        attribute: CFStringRef,
        language: *mut CFStringRef,
    ) -> CFTypeRef;
}

// CTFontCollectionCreateFromAvailableFonts
// CTFontCollectionCreateMatchingFontDescriptors
//
// CTFontDescriptorCopyAttribute
//   kCTFontFamilyNameAttribute
//   kCTFontStyleNameAttribute
//   kCTFontNameAttribute
//   kCTFontURLAttribute
//   kCTFontTraitsAttribute
//
// Traits:
//   kCTFontWeightTrait
//   kCTFontSymbolicTrait

// A font name kCTFontNameAttribute is like "Helvetica-BoldMT" whereas the font family name is
// "Helvetica".

#[derive(Clone)]
pub struct FontCollectionBackend {
    collection: CTFontCollection,
}

impl Debug for FontCollectionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCollectionBackend").finish_non_exhaustive()
    }
}

impl GenericFontCollectionBackend for FontCollectionBackend {
    type Description = FontDescriptionBackend;

    fn system() -> Self {
        Self { collection: font_collection::create_for_all_families() }
    }

    fn descriptions(&self) -> Vec<FontDescriptionBackend> {
        // The array and everything in it is released when `descriptors` is dropped. The
        // descriptions keep their own reference.
        let descriptors = match self.collection.get_descriptors() {
            Some(descriptors) => descriptors,
            None => {
                tracing::debug!("Core Text returned no font descriptors");
                return Vec::new();
            }
        };
        descriptors.iter()
            .map(|font_desc| FontDescriptionBackend { font_desc: (*font_desc).clone() })
            .collect()
    }
}

#[derive(Clone)]
pub struct FontDescriptionBackend {
    font_desc: CTFontDescriptor,
}

impl Debug for FontDescriptionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontDescriptionBackend")
            .field("postscript_name", &self.postscript_name())
            .finish()
    }
}

impl FontDescriptionBackend {
    fn copy_attribute(&self, attribute: CFStringRef) -> Option<CFType> {
        unsafe {
            let value = CTFontDescriptorCopyAttribute(self.font_desc.as_concrete_TypeRef(), attribute);
            if value.is_null() {
                return None;
            }
            Some(CFType::wrap_under_create_rule(value))
        }
    }

    fn string_attribute(&self, attribute: CFStringRef) -> Option<String> {
        self.copy_attribute(attribute)?
            .downcast::<CFString>()
            .map(|s| s.to_string())
    }

    fn traits(&self) -> Option<CFDictionary<CFString, CFType>> {
        let traits = self.copy_attribute(unsafe { kCTFontTraitsAttribute })?;
        if !traits.instance_of::<CFDictionary>() {
            return None;
        }
        // `traits` still owns its reference, so take another one.
        unsafe {
            Some(CFDictionary::wrap_under_get_rule(traits.as_CFTypeRef() as CFDictionaryRef))
        }
    }

    fn trait_number(&self, key: CFStringRef) -> Option<CFNumber> {
        let traits = self.traits()?;
        let key = unsafe { CFString::wrap_under_get_rule(key) };
        let value = traits.find(&key)?;
        value.downcast::<CFNumber>()
    }
}

impl GenericFontDescriptionBackend for FontDescriptionBackend {
    fn family_name(&self) -> Option<String> {
        self.string_attribute(unsafe { kCTFontFamilyNameAttribute })
    }

    fn localized_family_name(&self) -> Option<String> {
        unsafe {
            let mut language: CFStringRef = ptr::null();
            let value = CTFontDescriptorCopyLocalizedAttribute(
                self.font_desc.as_concrete_TypeRef(),
                kCTFontFamilyNameAttribute,
                &mut language);
            let value = if value.is_null() {
                None
            } else {
                Some(CFType::wrap_under_create_rule(value))
            };
            if language.is_null() {
                return None;
            }
            let language = CFString::wrap_under_create_rule(language);
            let name = value?.downcast::<CFString>()?.to_string();
            tracing::trace!(language = %language, name = %name, "resolved localized family name");
            Some(name)
        }
    }

    fn style_name(&self) -> Option<String> {
        self.string_attribute(unsafe { kCTFontStyleNameAttribute })
    }

    fn postscript_name(&self) -> Option<String> {
        self.string_attribute(unsafe { kCTFontNameAttribute })
    }

    fn path(&self) -> Option<PathBuf> {
        self.copy_attribute(unsafe { kCTFontURLAttribute })?
            .downcast::<CFURL>()?
            .to_path()
    }

    fn weight_trait(&self) -> Option<f32> {
        // Read as a double and narrow, since Core Text stores the trait as a CGFloat.
        self.trait_number(unsafe { kCTFontWeightTrait })?
            .to_f64()
            .map(|weight| weight as f32)
    }

    fn symbolic_traits(&self) -> Option<SymbolicTraits> {
        // CTFontSymbolicTraits is a uint32_t but is stored in the dictionary as a signed number.
        self.trait_number(unsafe { kCTFontSymbolicTrait })?
            .to_i64()
            .map(|bits| SymbolicTraits::from_bits_retain(bits as u32))
    }
}
