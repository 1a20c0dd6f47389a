//! Supertype edges for Android and AndroidX classes that only exist as
//! binaries in a real project. Lets supertype-chain queries walk from user
//! code into the platform hierarchy without class files.

/// `(class, direct superclass)` pairs
pub const PLATFORM_SUPERTYPES: &[(&str, &str)] = &[
    // Activities
    ("android.app.Activity", "android.view.ContextThemeWrapper"),
    ("android.view.ContextThemeWrapper", "android.content.ContextWrapper"),
    ("android.content.ContextWrapper", "android.content.Context"),
    ("androidx.core.app.ComponentActivity", "android.app.Activity"),
    ("androidx.activity.ComponentActivity", "androidx.core.app.ComponentActivity"),
    ("androidx.fragment.app.FragmentActivity", "androidx.activity.ComponentActivity"),
    ("androidx.appcompat.app.AppCompatActivity", "androidx.fragment.app.FragmentActivity"),
    ("android.support.v4.app.FragmentActivity", "android.app.Activity"),
    ("android.support.v7.app.AppCompatActivity", "android.support.v4.app.FragmentActivity"),
    // Fragments
    ("androidx.fragment.app.DialogFragment", "androidx.fragment.app.Fragment"),
    ("androidx.appcompat.app.AppCompatDialogFragment", "androidx.fragment.app.DialogFragment"),
    (
        "com.google.android.material.bottomsheet.BottomSheetDialogFragment",
        "androidx.appcompat.app.AppCompatDialogFragment",
    ),
    ("androidx.preference.PreferenceFragmentCompat", "androidx.fragment.app.Fragment"),
    ("android.support.v4.app.DialogFragment", "android.support.v4.app.Fragment"),
    ("android.app.DialogFragment", "android.app.Fragment"),
    // Services and receivers
    ("android.app.Service", "android.content.ContextWrapper"),
    ("android.app.IntentService", "android.app.Service"),
    ("androidx.lifecycle.LifecycleService", "android.app.Service"),
    ("androidx.core.app.JobIntentService", "android.app.Service"),
    // Application
    ("android.app.Application", "android.content.ContextWrapper"),
    ("androidx.multidex.MultiDexApplication", "android.app.Application"),
    ("android.support.multidex.MultiDexApplication", "android.app.Application"),
    // Views
    ("android.view.ViewGroup", "android.view.View"),
    ("android.widget.FrameLayout", "android.view.ViewGroup"),
    ("android.widget.LinearLayout", "android.view.ViewGroup"),
    ("android.widget.RelativeLayout", "android.view.ViewGroup"),
    ("android.widget.TextView", "android.view.View"),
    ("android.widget.ImageView", "android.view.View"),
    ("android.widget.Button", "android.widget.TextView"),
    ("androidx.constraintlayout.widget.ConstraintLayout", "android.view.ViewGroup"),
    ("androidx.recyclerview.widget.RecyclerView", "android.view.ViewGroup"),
    ("androidx.appcompat.widget.AppCompatTextView", "android.widget.TextView"),
    ("androidx.appcompat.widget.AppCompatImageView", "android.widget.ImageView"),
    ("androidx.cardview.widget.CardView", "android.widget.FrameLayout"),
    // ViewModels
    ("androidx.lifecycle.AndroidViewModel", "androidx.lifecycle.ViewModel"),
];

/// Whether a qualified name is one of the known platform classes
pub fn is_platform_type(name: &str) -> bool {
    PLATFORM_SUPERTYPES
        .iter()
        .any(|(child, parent)| *child == name || *parent == name)
}
