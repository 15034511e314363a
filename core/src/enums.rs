//! Closed sets of string constants used by the signature API.
//!
//! The wire format is always the literal string. Unknown values fail to
//! deserialize, and `FromStr` rejects them with `UnknownVariant`, so an
//! invalid literal can never be sent to the remote service.

use std::fmt;

/// A string that matches none of the variants of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// How the signer's browser returns to the caller's site after acting.
    pub enum RedirectMode {
        DoNotRedirect => "donot_redirect",
        Redirect => "redirect",
        IframeWithWebMessaging => "iframe_with_webmessaging",
        IframeWithRedirect => "iframe_with_redirect",
        IframeWithRedirectAndWebMessaging => "iframe_with_redirect_and_webmessaging",
    }
}

string_enum! {
    /// Class of signature proof.
    pub enum Mechanism {
        PkiSignature => "pkisignature",
        Identification => "identification",
        Handwritten => "handwritten",
        HandwrittenWithIdentification => "handwritten_with_identification",
    }
}

string_enum! {
    /// Authentication the signer must pass before seeing the document.
    pub enum AuthMechanism {
        Off => "off",
        Eid => "eid",
        SmsOtp => "smsOtp",
        EidAndSmsOtp => "eidAndSmsOtp",
    }
}

string_enum! {
    pub enum NotificationSetup {
        Off => "off",
        SendSms => "sendSms",
        SendEmail => "sendEmail",
        SendBoth => "sendBoth",
    }
}

string_enum! {
    /// Electronic ID used to produce a signature.
    pub enum SignatureMethod {
        NoBankIdMobile => "no_bankid_mobile",
        NoBankIdNetCentric => "no_bankid_netcentric",
        NoBuypass => "no_buypass",
        SeBankId => "se_bankid",
        DkNemId => "dk_nemid",
        FiTupas => "fi_tupas",
        FiMobiilivarmenne => "fi_mobiilivarmenne",
        FiEid => "fi_eid",
        SmsOtp => "sms_otp",
        Unknown => "unknown",
    }
}

string_enum! {
    /// Where the personal details on a signature came from.
    pub enum PersonalInfoOrigin {
        Unknown => "unknown",
        Eid => "eid",
        UserFormInput => "userFormInput",
    }
}

string_enum! {
    /// Lifecycle stage of a document.
    pub enum DocumentStatus {
        Unsigned => "unsigned",
        WaitingForAttachments => "waiting_for_attachments",
        PartialSigned => "partialsigned",
        Signed => "signed",
        Canceled => "canceled",
        Expired => "expired",
    }
}

impl DocumentStatus {
    /// No further signer action can change the document.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DocumentStatus::Signed | DocumentStatus::Canceled | DocumentStatus::Expired
        )
    }
}

string_enum! {
    /// Packaging of a retrievable document file.
    pub enum FileFormat {
        Unsigned => "unsigned",
        Native => "native",
        StandardPackaging => "standard_packaging",
        Pades => "pades",
        Xades => "xades",
    }
}

string_enum! {
    /// Language of notification texts.
    pub enum Language {
        English => "EN",
        Norwegian => "NO",
        Danish => "DA",
        Swedish => "SV",
        Finnish => "FI",
    }
}
